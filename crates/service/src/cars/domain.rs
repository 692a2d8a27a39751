use serde::{Deserialize, Serialize};

/// Tenant key, taken from the caller's identity and never from the payload.
pub type DealerId = i32;

/// One inventory line item owned by a dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub stock: i32,
    pub dealer_id: DealerId,
}

impl From<models::car::Model> for Car {
    fn from(m: models::car::Model) -> Self {
        Self { id: m.id, make: m.make, model: m.model_name, year: m.year, stock: m.stock, dealer_id: m.dealer_id }
    }
}

/// Creation payload. Unknown fields such as `id` or `dealer_id` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub stock: i32,
}

/// Stock mutation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCarStock {
    pub stock: i32,
}

// Search matching: trimmed, case-insensitive, exact on both fields.
pub(crate) use models::car::search_key;
