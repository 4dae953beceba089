//! Tax filing entity - A persisted tax computation for one day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tax filing database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_filings")]
pub struct Model {
    /// Unique identifier for the filing
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Day the filing was made
    pub filing_date: Date,
    /// Tax rate as a fraction in `[0, 1]`
    pub tax_rate: f64,
    /// Total cash-in at the time of filing
    pub total_sales: f64,
    /// `total_sales * tax_rate`, rounded to cents
    pub deductible_amount: f64,
    /// Account that filed
    pub filed_by: i64,
    /// When the filing was persisted
    pub created_at: DateTime,
}

/// Defines relationships between `TaxFiling` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each filing was made by one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::FiledBy",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
