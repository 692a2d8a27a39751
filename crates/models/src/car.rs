use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const MAX_LABEL_LEN: usize = 128;
pub const MIN_YEAR: i32 = 1886;
pub const MAX_YEAR: i32 = 9999;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub make: String,
    #[sea_orm(column_name = "model")]
    #[serde(rename = "model")]
    pub model_name: String,
    pub year: i32,
    pub stock: i32,
    pub dealer_id: i32,
    /// `search_key(make)`, written on insert.
    #[serde(skip)]
    pub make_key: String,
    /// `search_key(model)`, written on insert.
    #[serde(skip)]
    pub model_key: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Folding used for search: trimmed, Unicode lowercase. Stored alongside the
/// label so lookups never depend on the database's own `LOWER()`.
pub fn search_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim and check a free-text field (`make` or `model`).
pub fn validate_label(field: &str, value: &str) -> Result<String, errors::ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if v.chars().count() > MAX_LABEL_LEN {
        return Err(errors::ModelError::Validation(format!("{field} longer than {MAX_LABEL_LEN} characters")));
    }
    Ok(v.to_string())
}

pub fn validate_year(year: i32) -> Result<(), errors::ModelError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(errors::ModelError::Validation(format!("year must be within {MIN_YEAR}..={MAX_YEAR}")));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), errors::ModelError> {
    if stock < 0 {
        return Err(errors::ModelError::Validation("stock must not be negative".into()));
    }
    Ok(())
}

/// Insert a car for `dealer_id`; the id is assigned by the database.
pub async fn create(
    db: &DatabaseConnection,
    dealer_id: i32,
    make: &str,
    model: &str,
    year: i32,
    stock: i32,
) -> Result<Model, errors::ModelError> {
    let make = validate_label("make", make)?;
    let model = validate_label("model", model)?;
    validate_year(year)?;
    validate_stock(stock)?;

    let am = ActiveModel {
        make_key: Set(search_key(&make)),
        model_key: Set(search_key(&model)),
        make: Set(make),
        model_name: Set(model),
        year: Set(year),
        stock: Set(stock),
        dealer_id: Set(dealer_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
