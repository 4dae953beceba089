//! Store settings loaded from `config.toml`
//!
//! Every field has a default, so a missing file or a partial file is valid. The
//! database URL can additionally be overridden with the `DATABASE_URL` environment
//! variable (see [`crate::config::database::get_database_url`]).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Quantity below which a SKU is reported as low on stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Settings for the back-office store
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// `SeaORM` connection string for the store
    pub database_url: String,
    /// Directory that receives managed copies of SKU images
    pub asset_dir: PathBuf,
    /// Directory where dated financial and tax summaries are written
    pub report_dir: PathBuf,
    /// Append-only log of low-inventory notifications
    pub notification_log: PathBuf,
    /// Quantity below which a SKU counts as low on stock
    pub low_stock_threshold: i32,
    /// Whether restocking to or above the threshold re-arms the notification
    pub rearm_on_restock: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/retail_ledger.sqlite?mode=rwc".to_string(),
            asset_dir: PathBuf::from("data/assets"),
            report_dir: PathBuf::from("data/reports"),
            notification_log: PathBuf::from("data/low_inventory.log"),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            rearm_on_restock: false,
        }
    }
}

impl Settings {
    /// Settings rooted at `dir`, used by tests and embedded callers.
    #[must_use]
    pub fn rooted_at(dir: &Path) -> Self {
        Self {
            asset_dir: dir.join("assets"),
            report_dir: dir.join("reports"),
            notification_log: dir.join("low_inventory.log"),
            ..Self::default()
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The low-stock threshold is negative
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    let settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })?;

    if settings.low_stock_threshold < 0 {
        return Err(Error::Config {
            message: "low_stock_threshold cannot be negative".to_string(),
        });
    }
    Ok(settings)
}

/// Loads settings from the default location (./config.toml), falling back to
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<Settings> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        info!("No config.toml found, using default settings.");
        Ok(Settings::default())
    }
}
