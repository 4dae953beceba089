//! Attendance entity - One presence record per employee per calendar day.
//!
//! The (`employee_id`, `date`) pair is unique; the index is created alongside the
//! table in [`crate::config::database::create_tables`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Presence status of an attendance record.
///
/// Only `Present` is ever written; a missing record means "unknown", not absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AttendanceStatus {
    /// Employee checked in that day
    #[sea_orm(string_value = "present")]
    Present,
    /// Explicitly recorded absence
    #[sea_orm(string_value = "absent")]
    Absent,
}

/// Attendance database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Employee this record belongs to
    pub employee_id: i64,
    /// Calendar day of the record
    pub date: Date,
    /// Presence status
    pub status: AttendanceStatus,
    /// When the record was written
    pub marked_at: DateTime,
}

/// Defines relationships between Attendance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each record belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
