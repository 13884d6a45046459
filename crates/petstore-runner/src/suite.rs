//! Sequential suite execution

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use petstore_core::{CaseFailure, CaseOutcome, CaseReport, FailureKind, SuiteReport};

use crate::cases::ContractCase;
use crate::harness::Harness;

/// Runs catalog cases one at a time against a [`Harness`].
pub struct SuiteRunner<'h> {
    harness: &'h Harness,
    base_url: String,
    filter: Option<String>,
    stop_on_failure: bool,
}

impl<'h> SuiteRunner<'h> {
    #[must_use]
    pub fn new(harness: &'h Harness) -> Self {
        Self {
            harness,
            base_url: String::new(),
            filter: None,
            stop_on_failure: false,
        }
    }

    /// Recorded in the report only.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Only run cases whose name contains `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    #[must_use]
    pub fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    #[must_use]
    pub fn selects(&self, case: &ContractCase) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|filter| case.name.contains(filter))
    }

    #[must_use]
    pub fn run(&self, cases: &[ContractCase]) -> SuiteReport {
        let mut report = SuiteReport {
            base_url: self.base_url.clone(),
            ..SuiteReport::default()
        };

        for case in cases.iter().filter(|c| self.selects(c)) {
            let result = self.run_case(case);
            let failed = !result.passed();
            report.cases.push(result);
            if self.stop_on_failure && failed {
                tracing::warn!(case = %case.name, "stopping early: --stop-on-failure");
                report.stopped_early = true;
                break;
            }
        }

        report.cleanup_failures = self.harness.take_cleanup_failures();
        report
    }

    /// Run one case. Fixtures the case holds are released before this returns,
    /// including when the case panics.
    pub fn run_case(&self, case: &ContractCase) -> CaseReport {
        let span = tracing::info_span!("case", name = %case.name);
        let _entered = span.enter();

        self.harness.enter_case(&case.name);
        let start = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| case.run(self.harness)));
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(Ok(())) => {
                tracing::info!(duration_ms, "passed");
                CaseOutcome::Passed
            }
            Ok(Err(e)) => {
                let failure = CaseFailure::new(e.kind(), e.to_string());
                tracing::warn!(kind = %failure.kind, error = %failure.message, "failed");
                CaseOutcome::Failed(failure)
            }
            Err(payload) => {
                let failure = CaseFailure::new(FailureKind::Panic, panic_message(payload.as_ref()));
                tracing::warn!(error = %failure.message, "panicked");
                CaseOutcome::Failed(failure)
            }
        };

        CaseReport {
            name: case.name.clone(),
            feature: case.feature.as_str().to_string(),
            title: case.title.clone(),
            outcome,
            duration_ms,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("case panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("case panicked: {s}")
    } else {
        "case panicked".to_string()
    }
}
