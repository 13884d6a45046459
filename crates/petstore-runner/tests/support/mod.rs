//! In-process pet store behaving like the live service, plus fault knobs.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use petstore_core::Config;
use petstore_runner::{ApiRequest, ApiResponse, Harness, Method, Transport, TransportError};
use serde_json::{Value, json};

const VALID_STATUSES: [&str; 3] = ["available", "pending", "sold"];

/// Deviations from the live behavior, for failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Every DELETE answers this status and removes nothing.
    pub delete_status: Option<u16>,
    /// POST answers 500.
    pub reject_creates: bool,
    /// POST answers 200 but stores nothing.
    pub invisible_creates: bool,
    /// PUT answers 200 but the change is not persisted.
    pub stale_updates: bool,
}

#[derive(Default)]
struct State {
    pets: BTreeMap<i64, Value>,
    orders: BTreeMap<i64, Value>,
    faults: Faults,
    log: Vec<ApiRequest>,
}

#[derive(Clone, Default)]
pub struct FakePetStore {
    state: Rc<RefCell<State>>,
}

impl FakePetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(faults: Faults) -> Self {
        let store = Self::default();
        store.state.borrow_mut().faults = faults;
        store
    }

    pub fn set_faults(&self, faults: Faults) {
        self.state.borrow_mut().faults = faults;
    }

    /// Harness over this store with a fixed id seed.
    pub fn harness(&self) -> Harness {
        Harness::with_transport(Box::new(self.clone()), &Config::default()).with_seed(42)
    }

    pub fn insert_pet(&self, pet: Value) {
        let id = pet["id"].as_i64().unwrap();
        self.state.borrow_mut().pets.insert(id, pet);
    }

    pub fn pet_ids(&self) -> Vec<i64> {
        self.state.borrow().pets.keys().copied().collect()
    }

    pub fn order_ids(&self) -> Vec<i64> {
        self.state.borrow().orders.keys().copied().collect()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().log.clone()
    }

    /// Labels of every request sent, e.g. `DELETE /pet/42`.
    pub fn labels(&self) -> Vec<String> {
        self.state.borrow().log.iter().map(ApiRequest::label).collect()
    }

    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }
}

impl Transport for FakePetStore {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.borrow_mut();
        state.log.push(request.clone());
        let label = request.label();
        let (status, body, json_body) = state.route(request);
        let resp = ApiResponse::new(label, status, body);
        Ok(if json_body {
            resp.with_content_type("application/json")
        } else {
            resp.with_content_type("text/plain")
        })
    }
}

fn json_reply(status: u16, value: &Value) -> (u16, String, bool) {
    (status, value.to_string(), true)
}

fn text_reply(status: u16, text: &str) -> (u16, String, bool) {
    (status, text.to_string(), false)
}

impl State {
    fn route(&mut self, request: &ApiRequest) -> (u16, String, bool) {
        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        let method = request.method.clone();
        let body = request.body.clone().unwrap_or(Value::Null);

        match segments.as_slice() {
            ["pet"] if method == Method::POST => self.add_pet(body),
            ["pet"] if method == Method::PUT => self.update_pet(body),
            ["pet", "findByStatus"] if method == Method::GET => {
                self.find_by_status(request.query_value("status"))
            }
            ["pet", id] => match id.parse::<i64>() {
                Ok(id) if method == Method::GET => match self.pets.get(&id) {
                    Some(pet) => json_reply(200, pet),
                    None => text_reply(404, "Pet not found"),
                },
                Ok(id) if method == Method::DELETE => {
                    self.delete(|s| s.pets.remove(&id).map(|_| ()), "Pet deleted")
                }
                Ok(_) => text_reply(405, "Method not allowed"),
                Err(_) => text_reply(400, "Invalid ID supplied"),
            },
            ["store", "order"] if method == Method::POST => self.place_order(body),
            ["store", "order", id] => match id.parse::<i64>() {
                Ok(id) if method == Method::GET => match self.orders.get(&id) {
                    Some(order) => json_reply(200, order),
                    None => text_reply(404, "Order not found"),
                },
                Ok(id) if method == Method::DELETE => {
                    self.delete(|s| s.orders.remove(&id).map(|_| ()), "")
                }
                Ok(_) => text_reply(405, "Method not allowed"),
                Err(_) => text_reply(400, "Invalid ID supplied"),
            },
            ["store", "inventory"] if method == Method::GET => self.inventory(),
            _ => text_reply(404, "Not found"),
        }
    }

    fn add_pet(&mut self, mut pet: Value) -> (u16, String, bool) {
        if self.faults.reject_creates {
            return json_reply(500, &json!({"code": 500, "message": "create rejected"}));
        }
        let Some(id) = pet.get("id").and_then(Value::as_i64) else {
            return json_reply(400, &json!({"code": 400, "message": "Invalid input"}));
        };
        if let Some(fields) = pet.as_object_mut() {
            fields.entry("photoUrls").or_insert_with(|| json!([]));
            fields.entry("tags").or_insert_with(|| json!([]));
        }
        if !self.faults.invisible_creates {
            self.pets.insert(id, pet.clone());
        }
        json_reply(200, &pet)
    }

    fn update_pet(&mut self, mut pet: Value) -> (u16, String, bool) {
        let Some(id) = pet.get("id").and_then(Value::as_i64) else {
            return json_reply(400, &json!({"code": 400, "message": "Invalid input"}));
        };
        if !self.pets.contains_key(&id) {
            return text_reply(404, "Pet not found");
        }
        if let Some(fields) = pet.as_object_mut() {
            fields.entry("photoUrls").or_insert_with(|| json!([]));
            fields.entry("tags").or_insert_with(|| json!([]));
        }
        if !self.faults.stale_updates {
            self.pets.insert(id, pet.clone());
        }
        json_reply(200, &pet)
    }

    fn find_by_status(&self, status: Option<&str>) -> (u16, String, bool) {
        let Some(status) = status else {
            return text_reply(400, "No status provided. Try again?");
        };
        if !VALID_STATUSES.contains(&status) {
            let message = format!(
                "Input error: query parameter `status` value `{status}` is not in the allowable values `[available, pending, sold]`"
            );
            return json_reply(400, &json!({"code": 400, "message": message}));
        }
        let matching: Vec<Value> = self
            .pets
            .values()
            .filter(|p| p["status"] == status)
            .cloned()
            .collect();
        json_reply(200, &Value::Array(matching))
    }

    fn place_order(&mut self, order: Value) -> (u16, String, bool) {
        if self.faults.reject_creates {
            return json_reply(500, &json!({"code": 500, "message": "create rejected"}));
        }
        let Some(id) = order.get("id").and_then(Value::as_i64) else {
            return json_reply(400, &json!({"code": 400, "message": "Invalid input"}));
        };
        if !self.faults.invisible_creates {
            self.orders.insert(id, order.clone());
        }
        json_reply(200, &order)
    }

    fn delete(
        &mut self,
        remove: impl FnOnce(&mut Self) -> Option<()>,
        text: &str,
    ) -> (u16, String, bool) {
        if let Some(status) = self.faults.delete_status {
            return text_reply(status, "delete failed");
        }
        remove(self);
        text_reply(200, text)
    }

    fn inventory(&self) -> (u16, String, bool) {
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for pet in self.pets.values() {
            if let Some(status) = pet["status"].as_str() {
                *counts.entry(status.to_string()).or_default() += 1;
            }
        }
        json_reply(200, &json!(counts))
    }
}

/// Refuses every connection.
pub struct Unreachable;

impl Transport for Unreachable {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        Err(TransportError::Connect {
            label: request.label(),
            message: "connection refused".into(),
        })
    }
}
