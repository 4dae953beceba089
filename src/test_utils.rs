//! Shared test utilities for the retail ledger.
//!
//! This module provides helpers for setting up in-memory stores, sessions, and
//! catalog items with sensible defaults.

use crate::{
    config::Settings,
    core::{
        catalog::{self, NewSku},
        session::Session,
    },
    entities::{Role, account, sku},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an account directly (skipping password hashing) and returns its session.
pub async fn create_test_session(
    db: &DatabaseConnection,
    username: &str,
    role: Role,
) -> Result<Session> {
    let account = account::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set(role),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(Session::from_account(&account))
}

/// Sets up a store whose asset, report and log paths live in a fresh temp directory,
/// plus a manager session.
/// Returns (db, settings, `temp_dir`, manager); keep `temp_dir` alive for the test.
pub async fn setup_with_manager() -> Result<(DatabaseConnection, Settings, TempDir, Session)> {
    let db = setup_test_db().await?;
    let dir = tempfile::tempdir()?;
    let settings = Settings::rooted_at(dir.path());
    let manager = create_test_session(&db, "manager", Role::Manager).await?;
    Ok((db, settings, dir, manager))
}

/// Writes a small fake image under `<dir>/incoming` and returns its path.
pub fn create_test_image(dir: &Path, file_name: &str) -> PathBuf {
    let incoming = dir.join("incoming");
    let path = incoming.join(file_name);
    std::fs::create_dir_all(&incoming)
        .and_then(|()| std::fs::write(&path, b"\x89PNG test image"))
        .unwrap_or_else(|e| panic!("failed to create test image {path:?}: {e}"));
    path
}

/// Creates a SKU with sensible defaults.
///
/// # Defaults
/// * `description`: `"Test item"`
/// * `price`: 9.99
/// * image: a generated file next to the settings' asset directory
pub async fn create_test_sku(
    db: &DatabaseConnection,
    settings: &Settings,
    session: &Session,
    name: &str,
    quantity: i32,
) -> Result<sku::Model> {
    let root = settings.asset_dir.parent().unwrap_or_else(|| Path::new("."));
    let image = create_test_image(root, &format!("{}.png", name.replace(' ', "_")));
    catalog::add_sku(
        db,
        settings,
        session,
        NewSku {
            name,
            description: "Test item",
            price: 9.99,
            quantity,
            image_path: &image,
        },
    )
    .await
}
