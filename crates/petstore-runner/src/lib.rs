//! petstore-runner: blocking HTTP contract harness for the pet-store API
//!
//! A [`Harness`] wraps a [`Transport`] and hands out scoped fixtures. The
//! case catalog in [`cases`] asserts against it, and [`SuiteRunner`] turns a
//! run into a [`petstore_core::SuiteReport`].

pub mod assert;
pub mod cases;
pub mod client;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod payload;
pub mod suite;
pub mod transport;

pub use cases::{ContractCase, Feature, catalog};
pub use client::PetStoreApi;
pub use error::ContractError;
pub use fixture::{Fixture, OrderFixture, PetFixture, Remote};
pub use harness::Harness;
pub use suite::SuiteRunner;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportError};
