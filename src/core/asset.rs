//! Managed copies of SKU images.
//!
//! The caller supplies an image anywhere on disk; the catalog keeps its own copy under
//! the configured asset directory and stores the path of that copy.

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Copies `source` into `asset_dir` under a name derived from the SKU name.
///
/// The copy is named `<slug>-<unix millis>.<ext>`, with a counter appended if that
/// name is already taken, so an import never overwrites an existing asset.
///
/// # Errors
/// Returns `Error::Asset` if the directory cannot be created or the copy fails.
pub async fn import_image(asset_dir: &Path, source: &Path, sku_name: &str) -> Result<PathBuf> {
    let asset_error = |e: std::io::Error| Error::Asset {
        path: source.display().to_string(),
        source: e,
    };

    tokio::fs::create_dir_all(asset_dir).await.map_err(asset_error)?;

    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("img");
    let stem = format!(
        "{}-{}",
        slugify(sku_name),
        chrono::Utc::now().timestamp_millis()
    );
    let extension = extension.to_ascii_lowercase();
    let mut destination = asset_dir.join(format!("{stem}.{extension}"));
    let mut suffix = 1;
    while tokio::fs::try_exists(&destination).await.map_err(asset_error)? {
        destination = asset_dir.join(format!("{stem}-{suffix}.{extension}"));
        suffix += 1;
    }

    tokio::fs::copy(source, &destination)
        .await
        .map_err(asset_error)?;
    debug!("Copied image {:?} to {:?}", source, destination);
    Ok(destination)
}

/// Removes a managed copy, logging instead of failing if it is already gone.
pub async fn discard_image(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Could not remove orphaned asset {:?}: {}", path, e);
    }
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "sku".to_string()
    } else {
        slug.to_string()
    }
}
