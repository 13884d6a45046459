//! Typed endpoint calls for the pet-store API
//!
//! One method per endpoint, one HTTP call per method. Nothing here asserts;
//! responses come back as-is for the case to judge.

use serde_json::Value;

use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};

pub struct PetStoreApi {
    transport: Box<dyn Transport>,
}

impl PetStoreApi {
    #[must_use]
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send an arbitrary request through the underlying transport.
    ///
    /// # Errors
    ///
    /// Transport failures only; any HTTP status is `Ok`.
    pub fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        tracing::debug!(request = %request.label(), "sending");
        self.transport.send(request)
    }

    /// `POST /pet`
    pub fn add_pet(&self, pet: &Value) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::post("/pet").with_json(pet.clone()))
    }

    /// `PUT /pet` (id taken from the body)
    pub fn update_pet(&self, pet: &Value) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::put("/pet").with_json(pet.clone()))
    }

    /// `GET /pet/{id}`
    pub fn get_pet(&self, id: i64) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::get(format!("/pet/{id}")))
    }

    /// `DELETE /pet/{id}`
    pub fn delete_pet(&self, id: i64) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::delete(format!("/pet/{id}")))
    }

    /// `GET /pet/findByStatus`; `None` omits the `status` parameter entirely.
    pub fn find_pets_by_status(&self, status: Option<&str>) -> Result<ApiResponse, TransportError> {
        let mut request = ApiRequest::get("/pet/findByStatus");
        if let Some(status) = status {
            request = request.with_query("status", status);
        }
        self.send(&request)
    }

    /// `POST /store/order`
    pub fn place_order(&self, order: &Value) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::post("/store/order").with_json(order.clone()))
    }

    /// `GET /store/order/{id}`
    pub fn get_order(&self, id: i64) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::get(format!("/store/order/{id}")))
    }

    /// `DELETE /store/order/{id}`
    pub fn delete_order(&self, id: i64) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::delete(format!("/store/order/{id}")))
    }

    /// `GET /store/inventory`
    pub fn inventory(&self) -> Result<ApiResponse, TransportError> {
        self.send(&ApiRequest::get("/store/inventory"))
    }
}
