//! Tax filing - Applies a percentage rate to total sales and records the result.
//!
//! Total sales are the ledger's cash-in total at the moment of filing. Each filing is
//! persisted and printed to a dated tax summary.

use crate::{
    config::Settings,
    core::{
        ledger::{self, round_cents},
        report::{self, TaxSummary},
        session::{Capability, Session},
    },
    entities::{EntryKind, TaxFiling, tax_filing},
    errors::{Error, Result},
};
use chrono::{Local, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::path::PathBuf;
use tracing::{info, instrument};

/// A persisted filing together with the summary document written for it.
#[derive(Debug, Clone)]
pub struct FiledTax {
    /// The stored filing
    pub filing: tax_filing::Model,
    /// Path of the tax summary document
    pub report_path: PathBuf,
}

/// Files tax at `rate_percent` (0 to 100) of the current total cash-in.
///
/// Total sales are the cash-in total at the moment of filing, read from the ledger
/// rather than from any earlier summary. The percentage is stored as a fraction and
/// the deductible amount is that fraction of total sales, rounded to cents. Each call
/// stores a new filing dated today and writes the day's tax summary document,
/// replacing one written earlier the same day.
///
/// # Errors
/// Returns an error if:
/// - The session may not file taxes (`Error::Forbidden`)
/// - `rate_percent` is outside `[0, 100]` or not finite (`Error::Validation`, nothing
///   is written)
/// - The ledger aggregation or the insert fails
/// - The summary document cannot be written (the filing is already stored)
#[instrument(skip(db, settings, session), fields(actor = session.account_id))]
pub async fn file_tax(
    db: &DatabaseConnection,
    settings: &Settings,
    session: &Session,
    rate_percent: f64,
) -> Result<FiledTax> {
    session.require(Capability::FileTaxes)?;
    if !rate_percent.is_finite() || !(0.0..=100.0).contains(&rate_percent) {
        return Err(Error::validation(format!(
            "Tax rate must be between 0 and 100 percent (got {rate_percent})"
        )));
    }

    let tax_rate = rate_percent / 100.0;
    let total_sales = ledger::total_for(db, EntryKind::CashIn).await?;
    let deductible_amount = round_cents(total_sales * tax_rate);

    let filing = tax_filing::ActiveModel {
        filing_date: Set(Local::now().date_naive()),
        tax_rate: Set(tax_rate),
        total_sales: Set(total_sales),
        deductible_amount: Set(deductible_amount),
        filed_by: Set(session.account_id),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    let filing = filing.insert(db).await?;
    info!(
        "Filed tax at {:.2}% on {}: deductible {} (filing ID: {})",
        rate_percent,
        report::format_money(total_sales),
        report::format_money(deductible_amount),
        filing.id
    );

    let summary = TaxSummary {
        date: filing.filing_date,
        total_sales: filing.total_sales,
        tax_rate: filing.tax_rate,
        deductible_amount: filing.deductible_amount,
    };
    let report_path = report::write_tax_summary(&settings.report_dir, &summary).await?;

    Ok(FiledTax {
        filing,
        report_path,
    })
}

/// Lists all filings, newest first.
///
/// # Errors
/// Returns an error if the session may not file taxes or the query fails.
pub async fn list_tax_filings(
    db: &DatabaseConnection,
    session: &Session,
) -> Result<Vec<tax_filing::Model>> {
    session.require(Capability::FileTaxes)?;
    TaxFiling::find()
        .order_by_desc(tax_filing::Column::CreatedAt)
        .order_by_desc(tax_filing::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
