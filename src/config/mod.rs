/// Database connection and schema management
pub mod database;

/// Store settings loaded from config.toml
pub mod settings;

pub use settings::{Settings, load_config, load_default_config};
