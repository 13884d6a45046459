//! Request payloads: the fixed literals the cases send plus randomized ids

use chrono::{SecondsFormat, Utc};
use petstore_core::{Order, OrderStatus, Pet, PetStatus};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Range for generated ids. Starts well above ids that other clients of a
/// shared demo server tend to use, stays inside int32.
pub const ID_RANGE: std::ops::RangeInclusive<i64> = 100_000..=2_000_000_000;

/// Source of fresh resource ids.
pub struct IdSource {
    rng: SmallRng,
}

impl IdSource {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_id(&mut self) -> i64 {
        self.rng.gen_range(ID_RANGE)
    }
}

#[must_use]
pub fn minimal_pet(id: i64) -> Pet {
    Pet::new(id, "Buddy", PetStatus::Available)
}

/// Pet with every optional attribute filled.
#[must_use]
pub fn full_pet(id: i64) -> Pet {
    Pet::new(id, "doggie", PetStatus::Available)
        .with_category(1, "Dogs")
        .with_photo_urls(vec!["string".to_string()])
        .with_tag(0, "string")
}

#[must_use]
pub fn updated_pet(id: i64) -> Pet {
    Pet::new(id, "Buddy Updated", PetStatus::Sold)
}

/// Update payload for an id that must not exist.
#[must_use]
pub fn nonexistent_pet(id: i64) -> Pet {
    Pet::new(id, "Non-existent Pet", PetStatus::Available)
}

#[must_use]
pub fn order(id: i64, pet_id: i64) -> Order {
    Order {
        id,
        pet_id,
        quantity: 1,
        status: OrderStatus::Placed,
        ship_date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        complete: Some(true),
    }
}
