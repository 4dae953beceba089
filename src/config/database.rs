//! Database configuration module for the retail ledger.
//!
//! This module handles `SQLite` connection setup and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the store always matches the Rust models. Creation is idempotent: every statement
//! carries `IF NOT EXISTS`, which lets the binary run it on each startup.

use crate::config::Settings;
use crate::entities::{
    Account, Attendance, Customer, Employee, LedgerEntry, Sku, TaxFiling, attendance,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Name of the unique index that enforces one attendance record per employee per day
pub const ATTENDANCE_DAY_INDEX: &str = "idx_attendance_employee_date";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to the URL in the loaded settings.
#[must_use]
pub fn get_database_url(settings: &Settings) -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| settings.database_url.clone())
}

/// Establishes a connection to the store at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first so that
/// `?mode=rwc` can create the database file.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_parent(database_url) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    debug!("Connecting to store at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

fn sqlite_file_parent(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let file = rest.split('?').next()?;
    if file.is_empty() || file == ":memory:" {
        return None;
    }
    Path::new(file).parent()
}

/// Creates all tables and indexes if they do not already exist.
///
/// Safe to call repeatedly: existing tables and their rows are left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, Account).await?;
    create_table(db, &schema, Employee).await?;
    create_table(db, &schema, Attendance).await?;
    create_table(db, &schema, Customer).await?;
    create_table(db, &schema, Sku).await?;
    create_table(db, &schema, LedgerEntry).await?;
    create_table(db, &schema, TaxFiling).await?;

    let attendance_day = Index::create()
        .name(ATTENDANCE_DAY_INDEX)
        .table(Attendance)
        .col(attendance::Column::EmployeeId)
        .col(attendance::Column::Date)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&attendance_day)).await?;

    info!("Store tables ensured.");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}
