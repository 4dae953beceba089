//! SKU entity - One catalog item with its own price and on-hand quantity.
//!
//! `low_stock_notified` is owned by the low-inventory monitor; it flips to true the
//! first time the item is reported below the stock threshold.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SKU database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skus")]
pub struct Model {
    /// Unique identifier for the SKU
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item name, unique across the catalog
    #[sea_orm(unique)]
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Unit price in dollars, always greater than zero
    pub price: f64,
    /// Units on hand, never negative
    pub quantity: i32,
    /// Path of the managed copy of the item's image
    pub image_ref: String,
    /// Whether a low-stock notification has been emitted for this item
    pub low_stock_notified: bool,
    /// When the SKU was created
    pub created_at: DateTime,
    /// When the SKU was last modified
    pub updated_at: DateTime,
}

/// `Sku` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
