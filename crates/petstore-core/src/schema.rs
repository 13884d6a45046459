//! Declared response schemas for the pet-store API
//!
//! The bounds here encode the documented wire contract. They are written out
//! by hand on purpose and must not be derived from whatever the live server
//! happens to return.

use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::{Value, json};

/// Lower int32 bound used by the contract (symmetric range).
pub const INT32_MIN: i64 = -2_147_483_647;
/// Upper int32 bound.
pub const INT32_MAX: i64 = 2_147_483_647;

/// Resource kind a schema is keyed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Pet,
    Order,
    Inventory,
    ApiError,
}

impl SchemaKind {
    pub const ALL: [Self; 4] = [Self::Pet, Self::Order, Self::Inventory, Self::ApiError];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pet => "pet",
            Self::Order => "order",
            Self::Inventory => "inventory",
            Self::ApiError => "api-error",
        }
    }

    /// The declared JSON Schema document for this kind.
    #[must_use]
    pub fn document(self) -> Value {
        match self {
            Self::Pet => pet_schema(),
            Self::Order => order_schema(),
            Self::Inventory => inventory_schema(),
            Self::ApiError => api_error_schema(),
        }
    }

    fn validator(self) -> &'static Validator {
        static PET: OnceLock<Validator> = OnceLock::new();
        static ORDER: OnceLock<Validator> = OnceLock::new();
        static INVENTORY: OnceLock<Validator> = OnceLock::new();
        static API_ERROR: OnceLock<Validator> = OnceLock::new();

        let cell = match self {
            Self::Pet => &PET,
            Self::Order => &ORDER,
            Self::Inventory => &INVENTORY,
            Self::ApiError => &API_ERROR,
        };
        cell.get_or_init(|| {
            jsonschema::validator_for(&self.document()).expect("declared schemas must compile")
        })
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown schema kind: {s}"))
    }
}

/// Body did not conform to the declared schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} schema violation: {}", .errors.join("; "))]
pub struct SchemaViolation {
    pub kind: SchemaKind,
    /// Validator messages (first five)
    pub errors: Vec<String>,
}

/// Validate `instance` against the declared schema for `kind`.
///
/// # Errors
///
/// Returns [`SchemaViolation`] listing up to five validator messages.
pub fn validate(instance: &Value, kind: SchemaKind) -> Result<(), SchemaViolation> {
    let errors: Vec<String> = kind
        .validator()
        .iter_errors(instance)
        .take(5)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaViolation { kind, errors })
    }
}

fn int32() -> Value {
    json!({"type": "integer", "minimum": INT32_MIN, "maximum": INT32_MAX})
}

fn id_name_pair() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": int32(),
            "name": {"type": "string"}
        },
        "required": ["id", "name"]
    })
}

fn pet_schema() -> Value {
    json!({
        "title": "Pet",
        "type": "object",
        "properties": {
            "id": int32(),
            "name": {"type": "string"},
            "status": {"type": "string", "enum": ["available", "pending", "sold"]},
            "category": id_name_pair(),
            "photoUrls": {"type": "array", "items": {"type": "string"}},
            "tags": {"type": "array", "items": id_name_pair()}
        },
        "required": ["id", "name", "status"]
    })
}

fn order_schema() -> Value {
    json!({
        "title": "Order",
        "type": "object",
        "properties": {
            "id": int32(),
            "petId": int32(),
            "quantity": int32(),
            "shipDate": {"type": "string"},
            "status": {"type": "string", "enum": ["placed", "approved", "delivered"]},
            "complete": {"type": "boolean"}
        },
        "required": ["id", "petId", "quantity", "status"]
    })
}

fn inventory_schema() -> Value {
    json!({
        "title": "Inventory",
        "type": "object",
        "additionalProperties": {
            "type": "integer",
            "minimum": 0,
            "maximum": INT32_MAX
        }
    })
}

fn api_error_schema() -> Value {
    json!({
        "title": "ApiError",
        "type": "object",
        "properties": {
            "code": {"type": "integer"},
            "message": {"type": "string"}
        },
        "required": ["code", "message"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn minimal_pet_is_valid() {
        let pet = json!({"id": 1, "name": "Buddy", "status": "available", "photoUrls": []});
        assert!(validate(&pet, SchemaKind::Pet).is_ok());
    }

    #[test]
    fn full_pet_is_valid() {
        let pet = json!({
            "id": 10,
            "name": "doggie",
            "category": {"id": 1, "name": "Dogs"},
            "photoUrls": ["string"],
            "tags": [{"id": 0, "name": "string"}],
            "status": "available"
        });
        assert!(validate(&pet, SchemaKind::Pet).is_ok());
    }

    #[test]
    fn pet_missing_name_is_violation() {
        let pet = json!({"id": 1, "status": "available"});
        let err = validate(&pet, SchemaKind::Pet).unwrap_err();
        assert_eq!(err.kind, SchemaKind::Pet);
        assert!(err.errors.iter().any(|e| e.contains("name")), "{err}");
    }

    #[test]
    fn pet_with_unknown_status_is_violation() {
        let pet = json!({"id": 1, "name": "Buddy", "status": "lost"});
        assert!(validate(&pet, SchemaKind::Pet).is_err());
    }

    #[test]
    fn pet_id_above_int32_is_violation() {
        let pet = json!({"id": 2_147_483_648_i64, "name": "Big", "status": "sold"});
        assert!(validate(&pet, SchemaKind::Pet).is_err());
    }

    #[test]
    fn nested_tag_shape_is_checked() {
        let pet = json!({
            "id": 1,
            "name": "Buddy",
            "status": "sold",
            "tags": [{"id": "zero", "name": "string"}]
        });
        assert!(validate(&pet, SchemaKind::Pet).is_err());

        let pet = json!({
            "id": 1,
            "name": "Buddy",
            "status": "sold",
            "photoUrls": [42]
        });
        assert!(validate(&pet, SchemaKind::Pet).is_err());
    }

    #[test]
    fn order_requires_core_fields() {
        let order = json!({
            "id": 5,
            "petId": 198772,
            "quantity": 7,
            "shipDate": "2026-10-16T10:00:00.000+00:00",
            "status": "placed",
            "complete": true
        });
        assert!(validate(&order, SchemaKind::Order).is_ok());

        let missing_pet = json!({"id": 5, "quantity": 7, "status": "placed"});
        assert!(validate(&missing_pet, SchemaKind::Order).is_err());
    }

    #[test]
    fn inventory_rejects_negative_and_non_integer_counts() {
        assert!(validate(&json!({"available": 3, "sold": 0}), SchemaKind::Inventory).is_ok());
        assert!(validate(&json!({}), SchemaKind::Inventory).is_ok());
        assert!(validate(&json!({"available": -1}), SchemaKind::Inventory).is_err());
        assert!(validate(&json!({"available": 1.5}), SchemaKind::Inventory).is_err());
        assert!(validate(&json!({"available": "3"}), SchemaKind::Inventory).is_err());
        assert!(validate(&json!([1, 2]), SchemaKind::Inventory).is_err());
    }

    #[test]
    fn api_error_needs_code_and_message() {
        let body = json!({"code": 400, "message": "Input error"});
        assert!(validate(&body, SchemaKind::ApiError).is_ok());
        assert!(validate(&json!({"code": 400}), SchemaKind::ApiError).is_err());
    }

    #[test]
    fn violation_caps_messages_at_five() {
        let pet = json!({
            "id": "x",
            "name": 1,
            "status": 2,
            "category": "c",
            "photoUrls": "p",
            "tags": "t"
        });
        let err = validate(&pet, SchemaKind::Pet).unwrap_err();
        assert_eq!(err.errors.len(), 5);
    }

    #[test]
    fn kind_parses_from_name() {
        for kind in SchemaKind::ALL {
            assert_eq!(kind.as_str().parse::<SchemaKind>().unwrap(), kind);
        }
        assert!("store".parse::<SchemaKind>().is_err());
    }

    proptest! {
        #[test]
        fn inventory_accepts_any_non_negative_int32(
            counts in proptest::collection::btree_map("[a-z]{1,8}", 0..=INT32_MAX, 0..6)
        ) {
            let body = serde_json::to_value(&counts).unwrap();
            prop_assert!(validate(&body, SchemaKind::Inventory).is_ok());
        }

        #[test]
        fn inventory_rejects_any_negative_count(count in i64::MIN..0) {
            let body = json!({"available": count});
            prop_assert!(validate(&body, SchemaKind::Inventory).is_err());
        }

        #[test]
        fn pet_id_in_int32_range_is_valid(id in INT32_MIN..=INT32_MAX) {
            let pet = json!({"id": id, "name": "p", "status": "pending"});
            prop_assert!(validate(&pet, SchemaKind::Pet).is_ok());
        }
    }
}
