//! Ledger entry entity - A single recorded cash movement.
//!
//! Entries are append-only: nothing in the crate updates or deletes them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a cash movement
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum EntryKind {
    /// Money received
    #[sea_orm(string_value = "cash_in")]
    CashIn,
    /// Money paid out
    #[sea_orm(string_value = "cash_out")]
    CashOut,
}

/// Ledger entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Cash-in or cash-out
    pub kind: EntryKind,
    /// Strictly positive amount in dollars
    pub amount: f64,
    /// Business day the entry belongs to
    pub entry_date: Date,
    /// Exact time the entry was recorded
    pub recorded_at: DateTimeUtc,
    /// Account that recorded the entry
    pub recorded_by: i64,
}

/// Defines relationships between `LedgerEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry was recorded by one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::RecordedBy",
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
