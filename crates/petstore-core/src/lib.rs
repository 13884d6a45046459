//! petstore-core: declared contracts and verdict logic for pet-store API tests
//!
//! Everything in this crate is pure: configuration, wire models, the declared
//! JSON Schemas, body shape classification, and the report/verdict types a
//! run produces. HTTP lives in `petstore-runner`.

pub mod config;
pub mod model;
pub mod report;
pub mod schema;
pub mod shape;
pub mod verdict;

pub use config::{Config, ConfigError};
pub use model::{ApiError, Category, Inventory, Order, OrderStatus, Pet, PetStatus, Tag};
pub use report::{CaseFailure, CaseOutcome, CaseReport, CleanupFailure, SuiteReport};
pub use schema::{SchemaKind, SchemaViolation, validate};
pub use shape::{BodyShape, ShapeKind};
pub use verdict::{FailureKind, Severity, TOOL_ERROR_EXIT, Verdict, VerdictPolicy, VerdictStatus};
