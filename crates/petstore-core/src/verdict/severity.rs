//! How much a recorded failure counts against the run
//!
//! Leaked fixtures are a warning, broken contracts an error, and a service
//! that never answered is critical. The worst severity in a report picks the
//! exit code.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered from least to most serious, so `max()` over a report is its worst.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A fixture could not be deleted; case results still hold
    Warning,
    /// Status, body text, shape or schema did not match
    Error,
    /// No HTTP response at all (refused, reset, timed out)
    Critical,
}

impl Severity {
    /// Process exit code for a run whose worst failure has this severity.
    ///
    /// Leaks only fail the run in strict mode.
    #[must_use]
    pub const fn exit_code(self, strict: bool) -> i32 {
        match self {
            Self::Warning if strict => 1,
            Self::Warning => 0,
            Self::Error => 1,
            Self::Critical => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
