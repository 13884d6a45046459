//! Response body shape classification

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a response body turned out to be after a JSON parse attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// JSON array
    Sequence(Vec<Value>),
    /// JSON object
    KeyedObject(serde_json::Map<String, Value>),
    /// Valid JSON that is neither array nor object (string, number, bool, null)
    Scalar(Value),
    /// Body is not valid JSON; carries the parser message
    DecodeError(String),
}

/// Shape tag without payload, used in expectation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sequence,
    KeyedObject,
    Scalar,
    DecodeError,
}

impl BodyShape {
    /// Parse `body` and classify the result. Never fails.
    #[must_use]
    pub fn classify(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Array(items)) => Self::Sequence(items),
            Ok(Value::Object(map)) => Self::KeyedObject(map),
            Ok(other) => Self::Scalar(other),
            Err(e) => Self::DecodeError(e.to_string()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Sequence(_) => ShapeKind::Sequence,
            Self::KeyedObject(_) => ShapeKind::KeyedObject,
            Self::Scalar(_) => ShapeKind::Scalar,
            Self::DecodeError(_) => ShapeKind::DecodeError,
        }
    }

    /// Parsed JSON value, or `None` for a decode error.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Sequence(items) => Some(Value::Array(items)),
            Self::KeyedObject(map) => Some(Value::Object(map)),
            Self::Scalar(v) => Some(v),
            Self::DecodeError(_) => None,
        }
    }
}

impl ShapeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::KeyedObject => "keyed object",
            Self::Scalar => "scalar",
            Self::DecodeError => "decode error",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
