//! Customer entity - Directory of customers keyed by a 10-digit phone number.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Exactly ten ASCII digits, unique across customers
    #[sea_orm(unique)]
    pub phone: String,
    /// Customer name
    pub name: String,
    /// Billing amount captured at registration, in dollars
    pub billing_amount: f64,
    /// When the customer was registered
    pub created_at: DateTime,
}

/// `Customer` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
