//! Catalog business logic - SKU creation, lookup and stock adjustment.
//!
//! Every mutation of a SKU's quantity is followed by a low-inventory sweep, so the
//! notification flag returned to the caller is always current.

use crate::{
    config::Settings,
    core::{
        asset,
        ledger::round_cents,
        monitor,
        session::{Capability, Session},
    },
    entities::{Sku, sku},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::path::Path;
use tracing::{error, info, instrument};

/// Input for [`add_sku`].
#[derive(Debug, Clone, Copy)]
pub struct NewSku<'a> {
    /// Unique item name
    pub name: &'a str,
    /// Free-form description
    pub description: &'a str,
    /// Unit price, must be greater than zero
    pub price: f64,
    /// Opening quantity, must not be negative
    pub quantity: i32,
    /// Image supplied by the caller; a managed copy is stored
    pub image_path: &'a Path,
}

impl NewSku<'_> {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("SKU name cannot be empty"));
        }
        if !self.price.is_finite() || round_cents(self.price) <= 0.0 {
            return Err(Error::validation(format!(
                "Price must be greater than zero (got {})",
                self.price
            )));
        }
        if self.quantity < 0 {
            return Err(Error::validation(format!(
                "Quantity cannot be negative (got {})",
                self.quantity
            )));
        }
        Ok(())
    }
}

/// Creates a SKU, copies its image into the asset directory and runs the
/// low-inventory monitor.
///
/// Inputs are validated and the name is checked against the catalog before any
/// file is copied, so a rejected add leaves neither a row nor an orphaned asset. The
/// price is rounded to cents. The store's unique constraint on the name still
/// backs the early check if two adds race. Once the row is stored the add has
/// succeeded: a failure inside the monitor is logged and does not turn the result
/// into an error. The returned model reflects the monitor's outcome, so a SKU
/// created below the threshold normally comes back already flagged as notified.
///
/// # Errors
/// Returns an error, checked in this order, if:
/// - The session may not manage the catalog (`Error::Forbidden`)
/// - The name is blank, the price is not positive after rounding, or the quantity
///   is negative (`Error::Validation`, nothing is written)
/// - A SKU with the same name exists (`Error::Duplicate`)
/// - The image cannot be copied (`Error::Asset`)
#[instrument(skip(db, settings, session, new_sku), fields(name = new_sku.name))]
pub async fn add_sku(
    db: &DatabaseConnection,
    settings: &Settings,
    session: &Session,
    new_sku: NewSku<'_>,
) -> Result<sku::Model> {
    session.require(Capability::ManageCatalog)?;
    new_sku.validate()?;

    let name = new_sku.name.trim();
    let existing = Sku::find()
        .filter(sku::Column::Name.eq(name))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Duplicate {
            entity: "SKU",
            key: name.to_string(),
        });
    }

    let image_ref = asset::import_image(&settings.asset_dir, new_sku.image_path, name).await?;

    let now = chrono::Utc::now().naive_utc();
    let sku = sku::ActiveModel {
        name: Set(name.to_string()),
        description: Set(new_sku.description.trim().to_string()),
        price: Set(round_cents(new_sku.price)),
        quantity: Set(new_sku.quantity),
        image_ref: Set(image_ref.to_string_lossy().into_owned()),
        low_stock_notified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = match sku.insert(db).await {
        Ok(created) => created,
        Err(e) => {
            asset::discard_image(&image_ref).await;
            return Err(Error::from_insert(e, "SKU", name));
        }
    };
    info!(
        "Added SKU '{}' (ID: {}) at {:.2} with {} on hand",
        created.name, created.id, created.price, created.quantity
    );

    run_monitor(db, settings).await;
    reload(db, created).await
}

/// Lists every SKU in insertion order.
///
/// # Errors
/// Returns an error if the session may not view the catalog or the query fails.
pub async fn list_skus(db: &DatabaseConnection, session: &Session) -> Result<Vec<sku::Model>> {
    session.require(Capability::ViewCatalog)?;
    Sku::find()
        .order_by_asc(sku::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks a SKU up by primary key, returning None if it does not exist.
///
/// # Errors
/// Returns an error if the session may not view the catalog or the query fails.
pub async fn find_sku_by_id(
    db: &DatabaseConnection,
    session: &Session,
    sku_id: i64,
) -> Result<Option<sku::Model>> {
    session.require(Capability::ViewCatalog)?;
    Sku::find_by_id(sku_id).one(db).await.map_err(Into::into)
}

/// Looks a SKU up by its exact name.
///
/// # Errors
/// Returns an error if the session may not view the catalog or the query fails.
pub async fn find_sku_by_name(
    db: &DatabaseConnection,
    session: &Session,
    name: &str,
) -> Result<Option<sku::Model>> {
    session.require(Capability::ViewCatalog)?;
    Sku::find()
        .filter(sku::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds `delta` units (negative to remove) to a SKU's on-hand quantity.
///
/// When `rearm_on_restock` is enabled and the new quantity reaches the threshold,
/// the notification flag is cleared so the next shortage is reported again. The
/// low-inventory monitor runs after the update either way; like in [`add_sku`], a
/// failed sweep is logged and the committed quantity is still returned.
///
/// # Errors
/// Returns an error if:
/// - The session may not manage the catalog
/// - The SKU does not exist (`Error::NotFound`)
/// - The resulting quantity would be negative or overflow (`Error::Validation`)
#[instrument(skip(db, settings, session))]
pub async fn adjust_stock(
    db: &DatabaseConnection,
    settings: &Settings,
    session: &Session,
    sku_id: i64,
    delta: i32,
) -> Result<sku::Model> {
    session.require(Capability::ManageCatalog)?;

    let current = Sku::find_by_id(sku_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "SKU",
            key: sku_id.to_string(),
        })?;

    let new_quantity = current
        .quantity
        .checked_add(delta)
        .filter(|q| *q >= 0)
        .ok_or_else(|| {
            Error::validation(format!(
                "Cannot adjust '{}' by {delta}: only {} on hand",
                current.name, current.quantity
            ))
        })?;

    let rearm = settings.rearm_on_restock
        && current.low_stock_notified
        && new_quantity >= settings.low_stock_threshold;

    let mut active: sku::ActiveModel = current.into();
    active.quantity = Set(new_quantity);
    if rearm {
        active.low_stock_notified = Set(false);
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = active.update(db).await?;
    info!(
        "Adjusted stock of '{}' by {} to {}{}",
        updated.name,
        delta,
        updated.quantity,
        if rearm { " (low-stock notice re-armed)" } else { "" }
    );

    run_monitor(db, settings).await;
    reload(db, updated).await
}

/// Runs the low-inventory sweep after a committed catalog change. Notices are
/// informational, so a failed sweep is logged and left for the next run to retry.
async fn run_monitor(db: &DatabaseConnection, settings: &Settings) {
    if let Err(e) = monitor::check_low_inventory(db, settings).await {
        error!("Low-inventory sweep failed after catalog change: {}", e);
    }
}

async fn reload(db: &DatabaseConnection, model: sku::Model) -> Result<sku::Model> {
    Ok(Sku::find_by_id(model.id).one(db).await?.unwrap_or(model))
}
