//! Suite report: per-case outcomes plus cleanup failures
//!
//! This is the machine-readable output of a run (`--output json`, persisted
//! `summary.json`). Its JSON Schema is exported with [`generate_schema`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::verdict::{FailureKind, Severity};

/// Result of one contract case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    Failed(CaseFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseFailure {
    pub kind: FailureKind,
    pub severity: Severity,
    pub message: String,
}

impl CaseFailure {
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseReport {
    /// Stable catalog name, e.g. `pet::delete_by_id`
    pub name: String,
    /// `pet` or `store`
    pub feature: String,
    pub title: String,
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
}

impl CaseReport {
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&CaseFailure> {
        match &self.outcome {
            CaseOutcome::Passed => None,
            CaseOutcome::Failed(f) => Some(f),
        }
    }
}

/// A fixture that could not release its resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CleanupFailure {
    /// Case that owned the fixture
    pub case: String,
    /// e.g. `pet 123456`
    pub resource: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SuiteReport {
    pub base_url: String,
    pub cases: Vec<CaseReport>,
    #[serde(default)]
    pub cleanup_failures: Vec<CleanupFailure>,
    /// Set when `--stop-on-failure` cut the run short
    #[serde(default)]
    pub stopped_early: bool,
}

impl SuiteReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&CaseReport, &CaseFailure)> {
        self.cases
            .iter()
            .filter_map(|c| c.failure().map(|f| (c, f)))
    }

    /// Human-readable summary for terminal output.
    #[must_use]
    pub fn to_terminal(&self) -> String {
        let mut lines = Vec::new();
        for case in &self.cases {
            match &case.outcome {
                CaseOutcome::Passed => {
                    lines.push(format!("  ok    {} ({} ms)", case.name, case.duration_ms));
                }
                CaseOutcome::Failed(f) => {
                    lines.push(format!("  FAIL  {} [{}]", case.name, f.kind));
                    lines.push(format!("        {}", f.message));
                }
            }
        }
        if !self.cleanup_failures.is_empty() {
            lines.push(String::new());
            lines.push(format!("Cleanup failures ({}):", self.cleanup_failures.len()));
            for c in &self.cleanup_failures {
                lines.push(format!("  {} ({}): {}", c.resource, c.case, c.message));
            }
        }
        lines.push(String::new());
        lines.push(format!(
            "Cases: {} total, {} passed, {} failed",
            self.total(),
            self.passed(),
            self.failed()
        ));
        lines.join("\n")
    }
}

/// Generate JSON Schema for the suite report.
#[must_use]
pub fn generate_schema() -> String {
    let schema = schemars::schema_for!(SuiteReport);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
