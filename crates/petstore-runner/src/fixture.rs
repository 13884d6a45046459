//! Scoped fixtures: create a remote resource, hand it to the case, delete it
//! on every exit path.
//!
//! A [`Fixture`] is only returned once the create call answered 200 and a
//! follow-up read by id answered 200. Dropping it issues one best-effort
//! delete. A 200 or 404 on delete counts as released (the case may have
//! deleted the resource itself); anything else is logged and recorded on the
//! [`Harness`] as a cleanup failure without touching the case outcome.

use petstore_core::{Order, Pet};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::PetStoreApi;
use crate::error::ContractError;
use crate::harness::Harness;
use crate::transport::{ApiResponse, TransportError};

/// A server-owned resource a fixture can create, read and delete.
pub trait Remote: Serialize + DeserializeOwned {
    /// Human name used in logs and reports (`pet`, `order`).
    const NAME: &'static str;

    fn id(&self) -> i64;
    fn create(api: &PetStoreApi, body: &Value) -> Result<ApiResponse, TransportError>;
    fn read(api: &PetStoreApi, id: i64) -> Result<ApiResponse, TransportError>;
    fn delete(api: &PetStoreApi, id: i64) -> Result<ApiResponse, TransportError>;
}

impl Remote for Pet {
    const NAME: &'static str = "pet";

    fn id(&self) -> i64 {
        self.id
    }

    fn create(api: &PetStoreApi, body: &Value) -> Result<ApiResponse, TransportError> {
        api.add_pet(body)
    }

    fn read(api: &PetStoreApi, id: i64) -> Result<ApiResponse, TransportError> {
        api.get_pet(id)
    }

    fn delete(api: &PetStoreApi, id: i64) -> Result<ApiResponse, TransportError> {
        api.delete_pet(id)
    }
}

impl Remote for Order {
    const NAME: &'static str = "order";

    fn id(&self) -> i64 {
        self.id
    }

    fn create(api: &PetStoreApi, body: &Value) -> Result<ApiResponse, TransportError> {
        api.place_order(body)
    }

    fn read(api: &PetStoreApi, id: i64) -> Result<ApiResponse, TransportError> {
        api.get_order(id)
    }

    fn delete(api: &PetStoreApi, id: i64) -> Result<ApiResponse, TransportError> {
        api.delete_order(id)
    }
}

pub type PetFixture<'h> = Fixture<'h, Pet>;
pub type OrderFixture<'h> = Fixture<'h, Order>;

/// Guard over one remote resource.
pub struct Fixture<'h, R: Remote> {
    harness: &'h Harness,
    id: i64,
    record: R,
    body: Value,
    released: bool,
}

impl<'h, R: Remote> Fixture<'h, R> {
    /// Create `payload` remotely and confirm it is readable.
    ///
    /// # Errors
    ///
    /// [`ContractError::Setup`] if the create or the confirming read does not
    /// answer 200, or the create response does not parse. Once the create
    /// call succeeded, the resource is released even when a later setup step
    /// fails.
    pub fn create(harness: &'h Harness, payload: R) -> Result<Self, ContractError> {
        let body = serde_json::to_value(&payload)
            .map_err(|e| ContractError::from(e).into_setup(R::NAME))?;
        let resp = R::create(harness.api(), &body)
            .map_err(|e| ContractError::from(e).into_setup(R::NAME))?
            .expect_status(200)
            .map_err(|e| e.into_setup(R::NAME))?;

        // Guard from here on: cleanup uses the client-supplied id until the
        // server's answer is parsed.
        let mut fixture = Self {
            harness,
            id: payload.id(),
            record: payload,
            body,
            released: false,
        };

        let created = resp.expect_json().map_err(|e| e.into_setup(R::NAME))?;
        let record: R = serde_json::from_value(created.clone()).map_err(|e| {
            ContractError::Decode {
                label: resp.label.clone(),
                message: e.to_string(),
            }
            .into_setup(R::NAME)
        })?;
        fixture.id = record.id();
        fixture.record = record;
        fixture.body = created;

        R::read(harness.api(), fixture.id)
            .map_err(|e| ContractError::from(e).into_setup(R::NAME))?
            .expect_status(200)
            .map_err(|e| e.into_setup(R::NAME))?;

        tracing::debug!(resource = R::NAME, id = fixture.id, "fixture ready");
        Ok(fixture)
    }

    /// Guard a resource the case is about to create itself, so it is
    /// released with the case. [`Fixture::body`] is the encoded payload.
    ///
    /// # Errors
    ///
    /// [`ContractError::Encode`] if the record does not serialize.
    pub fn adopt(harness: &'h Harness, record: R) -> Result<Self, ContractError> {
        let body = serde_json::to_value(&record)?;
        Ok(Self {
            harness,
            id: record.id(),
            record,
            body,
            released: false,
        })
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Typed record parsed from the create response.
    #[must_use]
    pub const fn record(&self) -> &R {
        &self.record
    }

    /// Raw create response body, or the payload for an adopted record.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let resource = format!("{} {}", R::NAME, self.id);
        let failure = match R::delete(self.harness.api(), self.id) {
            Ok(resp) if resp.status == 200 || resp.status == 404 => {
                tracing::debug!(%resource, status = resp.status, "fixture released");
                return;
            }
            Ok(resp) => format!(
                "{} returned {} ({:?})",
                resp.label,
                resp.status,
                resp.body_excerpt()
            ),
            Err(e) => e.to_string(),
        };

        tracing::warn!(%resource, error = %failure, "fixture cleanup failed");
        self.harness.record_cleanup_failure(resource, failure);
    }
}

impl<R: Remote> Drop for Fixture<'_, R> {
    fn drop(&mut self) {
        self.release();
    }
}
