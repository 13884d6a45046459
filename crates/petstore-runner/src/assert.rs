//! Assertion steps over responses
//!
//! No I/O. Each check returns the first mismatch as a [`ContractError`]
//! carrying the request label, so a failing case reads like
//! `GET /pet/42: expected status 200, got 404`.

use petstore_core::{BodyShape, SchemaKind, ShapeKind};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ContractError;
use crate::transport::ApiResponse;

impl ApiResponse {
    /// # Errors
    ///
    /// [`ContractError::UnexpectedStatus`] when the status differs.
    pub fn expect_status(self, expected: u16) -> Result<Self, ContractError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(ContractError::UnexpectedStatus {
                expected,
                actual: self.status,
                body: self.body_excerpt().to_string(),
                label: self.label,
            })
        }
    }

    /// Exact body text match.
    ///
    /// # Errors
    ///
    /// [`ContractError::UnexpectedText`] when the body differs.
    pub fn expect_text(self, expected: &str) -> Result<Self, ContractError> {
        if self.body == expected {
            Ok(self)
        } else {
            Err(ContractError::UnexpectedText {
                expected: expected.to_string(),
                actual: self.body_excerpt().to_string(),
                label: self.label,
            })
        }
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// [`ContractError::Decode`] when the body is not JSON.
    pub fn expect_json(&self) -> Result<Value, ContractError> {
        serde_json::from_str(&self.body).map_err(|e| ContractError::Decode {
            label: self.label.clone(),
            message: e.to_string(),
        })
    }

    /// Parse the body and require a particular shape.
    ///
    /// # Errors
    ///
    /// [`ContractError::Decode`] when JSON was expected but the body does not
    /// parse, [`ContractError::UnexpectedShape`] on any other mismatch.
    pub fn expect_shape(&self, expected: ShapeKind) -> Result<BodyShape, ContractError> {
        let shape = self.shape();
        let actual = shape.kind();
        if actual == expected {
            return Ok(shape);
        }
        match shape {
            BodyShape::DecodeError(message) => Err(ContractError::Decode {
                label: self.label.clone(),
                message: match &self.content_type {
                    Some(content_type) => format!("{message} (content-type {content_type})"),
                    None => message,
                },
            }),
            _ => Err(ContractError::UnexpectedShape {
                label: self.label.clone(),
                expected,
                actual,
            }),
        }
    }

    /// The body must NOT be JSON.
    ///
    /// # Errors
    ///
    /// [`ContractError::UnexpectedShape`] if the body parses.
    pub fn expect_decode_failure(&self) -> Result<(), ContractError> {
        self.expect_shape(ShapeKind::DecodeError).map(|_| ())
    }
}

/// Validate `value` against a declared schema.
///
/// # Errors
///
/// [`ContractError::Schema`] on violation.
pub fn expect_schema(label: &str, value: &Value, kind: SchemaKind) -> Result<(), ContractError> {
    petstore_core::validate(value, kind).map_err(|source| ContractError::Schema {
        label: label.to_string(),
        source,
    })
}

/// Deserialize a validated body into its typed model.
///
/// # Errors
///
/// [`ContractError::Decode`] when the value does not fit `T`.
pub fn expect_model<T: DeserializeOwned>(label: &str, value: Value) -> Result<T, ContractError> {
    serde_json::from_value(value).map_err(|e| ContractError::Decode {
        label: label.to_string(),
        message: e.to_string(),
    })
}

/// `actual[field] == expected[field]`; an absent field compares as `null`.
///
/// # Errors
///
/// [`ContractError::FieldMismatch`] naming the first differing field.
pub fn expect_field(
    label: &str,
    actual: &Value,
    expected: &Value,
    field: &str,
) -> Result<(), ContractError> {
    let want = expected.get(field).unwrap_or(&Value::Null);
    let got = actual.get(field).unwrap_or(&Value::Null);
    if want == got {
        Ok(())
    } else {
        Err(ContractError::FieldMismatch {
            label: label.to_string(),
            field: field.to_string(),
            expected: want.clone(),
            actual: got.clone(),
        })
    }
}

/// [`expect_field`] over several fields, in order.
///
/// # Errors
///
/// The first mismatch.
pub fn expect_fields(
    label: &str,
    actual: &Value,
    expected: &Value,
    fields: &[&str],
) -> Result<(), ContractError> {
    fields
        .iter()
        .try_for_each(|field| expect_field(label, actual, expected, field))
}

/// Every field present in `payload` must equal the same field in `actual`.
///
/// # Errors
///
/// The first mismatch.
pub fn expect_payload_echoed(
    label: &str,
    actual: &Value,
    payload: &Value,
) -> Result<(), ContractError> {
    let Some(fields) = payload.as_object() else {
        return Ok(());
    };
    fields
        .keys()
        .try_for_each(|field| expect_field(label, actual, payload, field))
}
