//! Low-inventory monitor.
//!
//! Each SKU moves one way from "not notified" to "notified" the first time its
//! quantity is seen below the threshold. The flag is only cleared again by a restock
//! when `rearm_on_restock` is enabled (see [`crate::core::catalog::adjust_stock`]).
//!
//! Notifications go to an append-only text log and to `tracing`; nothing reads them back.

use crate::{
    config::Settings,
    entities::{Sku, sku},
    errors::Result,
};
use chrono::{SecondsFormat, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

/// A single low-stock event raised by [`check_low_inventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockNotice {
    /// SKU that fell below the threshold
    pub sku_id: i64,
    /// Name of the SKU
    pub name: String,
    /// Units left on hand
    pub remaining: i32,
}

impl LowStockNotice {
    fn log_line(&self) -> String {
        format!(
            "{} LOW_STOCK sku={} remaining={}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            self.name,
            self.remaining
        )
    }
}

/// Sweeps the catalog and notifies once for every SKU below the threshold that has
/// not been notified yet.
///
/// Runs after every SKU addition and stock adjustment, and once at startup. Calling it
/// repeatedly without a stock change raises nothing new.
///
/// # Errors
/// Returns an error if the catalog query, the flag update, or the log append fails.
#[instrument(skip_all)]
pub async fn check_low_inventory(
    db: &DatabaseConnection,
    settings: &Settings,
) -> Result<Vec<LowStockNotice>> {
    let pending = Sku::find()
        .filter(sku::Column::Quantity.lt(settings.low_stock_threshold))
        .filter(sku::Column::LowStockNotified.eq(false))
        .order_by_asc(sku::Column::Id)
        .all(db)
        .await?;

    let mut notices = Vec::with_capacity(pending.len());
    for item in pending {
        let notice = LowStockNotice {
            sku_id: item.id,
            name: item.name.clone(),
            remaining: item.quantity,
        };
        append_notification(&settings.notification_log, &notice).await?;
        warn!(
            "Low inventory: '{}' has {} unit(s) left",
            notice.name, notice.remaining
        );

        let mut active: sku::ActiveModel = item.into();
        active.low_stock_notified = Set(true);
        active.update(db).await?;

        notices.push(notice);
    }

    debug!("Low-inventory sweep raised {} notification(s)", notices.len());
    Ok(notices)
}

async fn append_notification(log_path: &Path, notice: &LowStockNotice) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .await?;
    file.write_all(notice.log_line().as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
