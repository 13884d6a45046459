//! Contract case catalog
//!
//! Every case is a named closure over the [`Harness`]. Cases make their
//! blocking calls in order and return the first failed assertion; fixtures
//! they hold are released on the way out whatever the result.

pub mod matrix;
mod pet;
mod store;

use std::fmt;

use crate::error::ContractError;
use crate::harness::Harness;

pub use matrix::{STATUS_MATRIX, StatusInput, StatusRow};

/// Resource area a case belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Pet,
    Store,
}

impl Feature {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type CaseFn = Box<dyn Fn(&Harness) -> Result<(), ContractError>>;

pub struct ContractCase {
    pub name: String,
    pub feature: Feature,
    pub title: String,
    run: CaseFn,
}

impl ContractCase {
    pub fn new(
        name: impl Into<String>,
        feature: Feature,
        title: impl Into<String>,
        run: impl Fn(&Harness) -> Result<(), ContractError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            feature,
            title: title.into(),
            run: Box::new(run),
        }
    }

    /// Run the case body once.
    ///
    /// # Errors
    ///
    /// The first failed step.
    pub fn run(&self, harness: &Harness) -> Result<(), ContractError> {
        (self.run)(harness)
    }
}

impl fmt::Debug for ContractCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractCase")
            .field("name", &self.name)
            .field("feature", &self.feature)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// All cases in execution order: pet cases, the findByStatus matrix, store cases.
#[must_use]
pub fn catalog() -> Vec<ContractCase> {
    let mut cases = pet::cases();
    cases.extend(matrix::cases());
    cases.extend(store::cases());
    cases
}
