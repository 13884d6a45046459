//! Contract errors: every way a case step can fail

use petstore_core::{FailureKind, SchemaViolation, ShapeKind};
use serde_json::Value;

use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("{label}: expected status {expected}, got {actual} (body: {body:?})")]
    UnexpectedStatus {
        label: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{label}: expected body {expected:?}, got {actual:?}")]
    UnexpectedText {
        label: String,
        expected: String,
        actual: String,
    },

    #[error("{label}: expected {expected} body, got {actual}")]
    UnexpectedShape {
        label: String,
        expected: ShapeKind,
        actual: ShapeKind,
    },

    #[error("{label}: {source}")]
    Schema {
        label: String,
        #[source]
        source: SchemaViolation,
    },

    #[error("{label}: field `{field}` expected {expected}, got {actual}")]
    FieldMismatch {
        label: String,
        field: String,
        expected: Value,
        actual: Value,
    },

    #[error("{label}: body is not valid JSON: {message}")]
    Decode { label: String, message: String },

    #[error("{resource} fixture setup failed: {source}")]
    Setup {
        resource: String,
        #[source]
        source: Box<ContractError>,
    },

    #[error("cannot encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ContractError {
    /// Wrap as a setup failure of `resource`.
    #[must_use]
    pub fn into_setup(self, resource: impl Into<String>) -> Self {
        Self::Setup {
            resource: resource.into(),
            source: Box::new(self),
        }
    }

    /// Map onto the report taxonomy.
    ///
    /// An unreachable service during setup still reports as a transport failure.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnexpectedStatus { .. }
            | Self::UnexpectedText { .. }
            | Self::UnexpectedShape { .. }
            | Self::Schema { .. }
            | Self::FieldMismatch { .. } => FailureKind::ContractViolation,
            Self::Decode { .. } => FailureKind::DecodeFailure,
            Self::Setup { source, .. } => match source.kind() {
                FailureKind::Transport => FailureKind::Transport,
                _ => FailureKind::SetupFailure,
            },
            Self::Encode(_) => FailureKind::SetupFailure,
            Self::Transport(_) => FailureKind::Transport,
        }
    }
}
