//! Account entity - A login identity carrying a fixed role.
//!
//! The role decides which operations a session may perform; see
//! [`crate::core::session`] for the capability table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag stored on every account. Immutable after registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Role {
    /// Store manager with full back-office access
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Till operator with front-counter access only
    #[sea_orm(string_value = "cashier")]
    Cashier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manager => write!(f, "Manager"),
            Self::Cashier => write!(f, "Cashier"),
        }
    }
}

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across all accounts
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC string; the clear-text password is never stored
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role granted at registration
    pub role: Role,
    /// When the account was registered
    pub created_at: DateTime,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One account may be linked to employees
    #[sea_orm(has_many = "super::employee::Entity")]
    Employees,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
