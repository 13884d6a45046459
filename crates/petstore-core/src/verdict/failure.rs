//! Failure taxonomy

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Severity;

/// Why a case (or its cleanup) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Status, shape, schema or field mismatch
    ContractViolation,
    /// Body was expected to be JSON and was not
    DecodeFailure,
    /// A fixture could not create or confirm its resource
    SetupFailure,
    /// Connection refused, timeout, or other transport error
    Transport,
    /// Case body panicked
    Panic,
    /// Fixture release did not succeed (resource may have leaked)
    CleanupFailure,
}

impl FailureKind {
    #[must_use]
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::ContractViolation | Self::DecodeFailure | Self::SetupFailure | Self::Panic => {
                Severity::Error
            }
            Self::Transport => Severity::Critical,
            Self::CleanupFailure => Severity::Warning,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ContractViolation => "Response broke the documented contract",
            Self::DecodeFailure => "Response body was not valid JSON",
            Self::SetupFailure => "Fixture setup failed",
            Self::Transport => "Request did not complete",
            Self::Panic => "Case panicked",
            Self::CleanupFailure => "Fixture cleanup failed",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_mapping() {
        assert_eq!(
            FailureKind::ContractViolation.default_severity(),
            Severity::Error
        );
        assert_eq!(FailureKind::DecodeFailure.default_severity(), Severity::Error);
        assert_eq!(FailureKind::SetupFailure.default_severity(), Severity::Error);
        assert_eq!(FailureKind::Transport.default_severity(), Severity::Critical);
        assert_eq!(
            FailureKind::CleanupFailure.default_severity(),
            Severity::Warning
        );
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FailureKind::SetupFailure).unwrap(),
            "\"setup_failure\""
        );
    }
}
