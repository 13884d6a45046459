//! Verdict policy - turns a suite report into pass/fail and an exit code

use serde::{Deserialize, Serialize};

use super::{FailureKind, Severity};
use crate::report::SuiteReport;

/// Exit code for "the tool itself could not do its job".
pub const TOOL_ERROR_EXIT: i32 = 3;

#[derive(Debug, Clone)]
pub struct VerdictPolicy {
    /// Strict mode: cleanup failures (leaks) fail the run
    pub strict: bool,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl VerdictPolicy {
    #[must_use]
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Highest exit code among case failures and cleanup warnings.
    #[must_use]
    pub fn exit_code(&self, report: &SuiteReport) -> i32 {
        if report.total() == 0 {
            return TOOL_ERROR_EXIT;
        }
        let case_code = report
            .failures()
            .map(|(_, f)| f.severity.exit_code(self.strict))
            .max()
            .unwrap_or(0);
        let cleanup_code = if report.cleanup_failures.is_empty() {
            0
        } else {
            FailureKind::CleanupFailure
                .default_severity()
                .exit_code(self.strict)
        };
        case_code.max(cleanup_code)
    }

    /// PASS requires every case to pass (and, when strict, no leaks).
    #[must_use]
    pub fn verdict(&self, report: &SuiteReport) -> Verdict {
        let exit_code = self.exit_code(report);
        let status = if exit_code == 0 {
            VerdictStatus::Pass
        } else {
            VerdictStatus::Fail
        };

        let reason = if report.total() == 0 {
            "No cases were run".to_string()
        } else {
            let mut parts = Vec::new();
            let failed = report.failed();
            if failed == 0 {
                parts.push(format!("All {} cases passed", report.total()));
            } else {
                let critical = report
                    .failures()
                    .filter(|(_, f)| f.severity == Severity::Critical)
                    .count();
                parts.push(format!(
                    "{failed} of {} cases failed ({critical} critical)",
                    report.total()
                ));
            }
            if !report.cleanup_failures.is_empty() {
                parts.push(format!(
                    "{} cleanup failures",
                    report.cleanup_failures.len()
                ));
            }
            parts.join("; ")
        };

        Verdict {
            status,
            exit_code,
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub exit_code: i32,
    pub reason: String,
}
