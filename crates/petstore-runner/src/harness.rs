//! Per-run context handed to every case

use std::cell::RefCell;

use petstore_core::{CleanupFailure, Config, Order, Pet};

use crate::client::PetStoreApi;
use crate::error::ContractError;
use crate::fixture::{Fixture, OrderFixture, PetFixture};
use crate::payload::{self, IdSource};
use crate::transport::{HttpTransport, Transport, TransportError};

/// API client, sentinel ids, id source and the cleanup ledger.
///
/// Single-threaded by construction: cases run one after another and share
/// nothing but this context.
pub struct Harness {
    api: PetStoreApi,
    missing_pet_id: i64,
    missing_order_id: i64,
    ids: RefCell<IdSource>,
    current_case: RefCell<String>,
    cleanup_failures: RefCell<Vec<CleanupFailure>>,
}

impl Harness {
    /// Harness over the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(Box::new(transport), config))
    }

    #[must_use]
    pub fn with_transport(transport: Box<dyn Transport>, config: &Config) -> Self {
        Self {
            api: PetStoreApi::new(transport),
            missing_pet_id: config.missing_pet_id,
            missing_order_id: config.missing_order_id,
            ids: RefCell::new(IdSource::from_entropy()),
            current_case: RefCell::new(String::new()),
            cleanup_failures: RefCell::new(Vec::new()),
        }
    }

    /// Use a deterministic id sequence.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ids = RefCell::new(IdSource::seeded(seed));
        self
    }

    #[must_use]
    pub const fn api(&self) -> &PetStoreApi {
        &self.api
    }

    #[must_use]
    pub const fn missing_pet_id(&self) -> i64 {
        self.missing_pet_id
    }

    #[must_use]
    pub const fn missing_order_id(&self) -> i64 {
        self.missing_order_id
    }

    pub fn next_id(&self) -> i64 {
        self.ids.borrow_mut().next_id()
    }

    /// Fixture: a fresh minimal pet with a random id.
    ///
    /// # Errors
    ///
    /// [`ContractError::Setup`] when the pet cannot be created and read back.
    pub fn create_pet(&self) -> Result<PetFixture<'_>, ContractError> {
        Fixture::create(self, payload::minimal_pet(self.next_id()))
    }

    /// Fixture: a fresh placed order with random order and pet ids.
    ///
    /// # Errors
    ///
    /// [`ContractError::Setup`] when the order cannot be placed and read back.
    pub fn create_order(&self) -> Result<OrderFixture<'_>, ContractError> {
        Fixture::create(self, payload::order(self.next_id(), self.next_id()))
    }

    /// Guard a pet the case creates itself.
    ///
    /// # Errors
    ///
    /// [`ContractError::Encode`] if the pet does not serialize.
    pub fn adopt_pet(&self, pet: Pet) -> Result<PetFixture<'_>, ContractError> {
        Fixture::adopt(self, pet)
    }

    /// Guard an order the case places itself.
    ///
    /// # Errors
    ///
    /// [`ContractError::Encode`] if the order does not serialize.
    pub fn adopt_order(&self, order: Order) -> Result<OrderFixture<'_>, ContractError> {
        Fixture::adopt(self, order)
    }

    pub(crate) fn enter_case(&self, name: &str) {
        name.clone_into(&mut self.current_case.borrow_mut());
    }

    pub(crate) fn record_cleanup_failure(&self, resource: String, message: String) {
        let case = self.current_case.borrow().clone();
        self.cleanup_failures.borrow_mut().push(CleanupFailure {
            case,
            resource,
            message,
        });
    }

    /// Drain cleanup failures recorded so far.
    pub fn take_cleanup_failures(&self) -> Vec<CleanupFailure> {
        self.cleanup_failures.take()
    }
}
