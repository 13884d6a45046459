//! Verdict module - failure taxonomy, severity, and run policy

mod failure;
mod policy;
mod severity;

pub use failure::FailureKind;
pub use policy::{TOOL_ERROR_EXIT, Verdict, VerdictPolicy, VerdictStatus};
pub use severity::Severity;
