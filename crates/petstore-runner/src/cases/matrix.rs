//! `GET /pet/findByStatus` across valid, invalid, empty and absent inputs
//!
//! The table is expanded into one catalog entry per row, so a failing row
//! never hides the others.

use petstore_core::{ApiError, SchemaKind, ShapeKind};

use super::{ContractCase, Feature};
use crate::assert::{expect_model, expect_schema};
use crate::error::ContractError;
use crate::harness::Harness;

/// Value sent for the `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusInput {
    /// `?status=<value>`, possibly empty
    Value(&'static str),
    /// No `status` parameter at all
    Absent,
}

impl StatusInput {
    const fn param(self) -> Option<&'static str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent => None,
        }
    }

    /// Label used in the case name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Value("") => "empty",
            Self::Value(v) => v,
            Self::Absent => "absent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRow {
    pub input: StatusInput,
    pub expected_status: u16,
    pub expects_json: bool,
    /// Required when `expects_json`
    pub expected_shape: Option<ShapeKind>,
}

impl StatusRow {
    const fn json(input: StatusInput, expected_status: u16, shape: ShapeKind) -> Self {
        Self {
            input,
            expected_status,
            expects_json: true,
            expected_shape: Some(shape),
        }
    }

    const fn text(input: StatusInput, expected_status: u16) -> Self {
        Self {
            input,
            expected_status,
            expects_json: false,
            expected_shape: None,
        }
    }

    #[must_use]
    pub fn case_name(&self) -> String {
        format!("pet::find_by_status[{}]", self.input.label())
    }

    /// Issue the request and check status, then shape or decode failure.
    ///
    /// # Errors
    ///
    /// The first mismatch.
    pub fn check(&self, harness: &Harness) -> Result<(), ContractError> {
        let resp = harness
            .api()
            .find_pets_by_status(self.input.param())?
            .expect_status(self.expected_status)?;

        if !self.expects_json {
            return resp.expect_decode_failure();
        }

        let expected = self.expected_shape.unwrap_or(ShapeKind::Sequence);
        let shape = resp.expect_shape(expected)?;
        if expected == ShapeKind::KeyedObject {
            let body = shape.into_value().unwrap_or_default();
            expect_schema(&resp.label, &body, SchemaKind::ApiError)?;
            let error: ApiError = expect_model(&resp.label, body)?;
            tracing::debug!(code = error.code, message = %error.message, "input rejected");
        }
        Ok(())
    }
}

pub const STATUS_MATRIX: [StatusRow; 6] = [
    StatusRow::json(StatusInput::Value("available"), 200, ShapeKind::Sequence),
    StatusRow::json(StatusInput::Value("pending"), 200, ShapeKind::Sequence),
    StatusRow::json(StatusInput::Value("sold"), 200, ShapeKind::Sequence),
    StatusRow::json(StatusInput::Value("vdvd"), 400, ShapeKind::KeyedObject),
    StatusRow::json(StatusInput::Value(""), 400, ShapeKind::KeyedObject),
    StatusRow::text(StatusInput::Absent, 400),
];

pub(super) fn cases() -> Vec<ContractCase> {
    STATUS_MATRIX
        .iter()
        .map(|row| {
            let row = *row;
            let title = match row.input {
                StatusInput::Absent => {
                    format!("findByStatus without status -> {}", row.expected_status)
                }
                StatusInput::Value(v) => {
                    format!("findByStatus status={v:?} -> {}", row.expected_status)
                }
            };
            ContractCase::new(row.case_name(), Feature::Pet, title, move |h| row.check(h))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};
    use petstore_core::{Config, PetStatus};

    /// Answers every request with the same status and body.
    struct Canned(u16, &'static str);

    impl Transport for Canned {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
            Ok(ApiResponse::new(request.label(), self.0, self.1))
        }
    }

    fn check_against(
        row: &StatusRow,
        status: u16,
        body: &'static str,
    ) -> Result<(), ContractError> {
        let transport = Box::new(Canned(status, body));
        row.check(&Harness::with_transport(transport, &Config::default()))
    }

    fn row(label: &str) -> StatusRow {
        STATUS_MATRIX
            .into_iter()
            .find(|r| r.input.label() == label)
            .unwrap()
    }

    #[test]
    fn row_names() {
        let names: Vec<String> = STATUS_MATRIX.iter().map(StatusRow::case_name).collect();
        assert_eq!(
            names,
            [
                "pet::find_by_status[available]",
                "pet::find_by_status[pending]",
                "pet::find_by_status[sold]",
                "pet::find_by_status[vdvd]",
                "pet::find_by_status[empty]",
                "pet::find_by_status[absent]",
            ]
        );
    }

    #[test]
    fn json_rows_declare_a_shape() {
        for row in STATUS_MATRIX {
            assert_eq!(row.expects_json, row.expected_shape.is_some(), "{row:?}");
        }
    }

    #[test]
    fn only_valid_statuses_succeed() {
        for row in STATUS_MATRIX {
            let valid = matches!(
                row.input,
                StatusInput::Value(v) if PetStatus::ALL.iter().any(|s| s.as_str() == v)
            );
            assert_eq!(row.expected_status == 200, valid, "{row:?}");
        }
    }

    #[test]
    fn rows_pass_against_the_expected_answers() {
        check_against(&row("sold"), 200, "[]").unwrap();
        check_against(&row("vdvd"), 400, r#"{"code": 400, "message": "Input error"}"#).unwrap();
        check_against(&row("absent"), 400, "No status provided. Try again?").unwrap();
    }

    #[test]
    fn error_body_without_message_fails_the_schema() {
        let err = check_against(&row("vdvd"), 400, r#"{"code": 400}"#).unwrap_err();
        assert!(matches!(err, ContractError::Schema { .. }), "{err}");
        assert!(err.to_string().contains("\"message\""), "{err}");
    }

    #[test]
    fn json_answer_to_missing_status_fails() {
        let err = check_against(&row("absent"), 400, r#"{"code": 400, "message": "x"}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnexpectedShape {
                expected: ShapeKind::DecodeError,
                actual: ShapeKind::KeyedObject,
                ..
            }
        ));
    }

    #[test]
    fn object_where_a_list_belongs_fails() {
        let err = check_against(&row("available"), 200, r#"{"pets": []}"#).unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnexpectedShape {
                expected: ShapeKind::Sequence,
                actual: ShapeKind::KeyedObject,
                ..
            }
        ));
    }

    #[test]
    fn wrong_status_fails_before_the_body_is_read() {
        let err = check_against(&row("empty"), 200, "[]").unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnexpectedStatus { expected: 400, actual: 200, .. }
        ));
    }
}
