//! Ledger business logic - Cash movements and the figures derived from them.
//!
//! Entries are append-only. Totals are aggregated by the store on every call rather
//! than cached, so they always reflect the current ledger.

use crate::{
    config::Settings,
    core::{
        report::{self, FinancialSummary},
        session::{Capability, Session},
    },
    entities::{EntryKind, LedgerEntry, ledger_entry},
    errors::{Error, Result},
};
use chrono::{Local, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Rounds a dollar amount to whole cents.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Records a cash movement dated today on behalf of the session's account.
///
/// # Errors
/// Returns an error if:
/// - The session may not record transactions
/// - The amount is not a positive finite number, or rounds to zero cents
/// - The database insert operation fails
#[instrument(skip(db, session), fields(actor = session.account_id))]
pub async fn record_transaction(
    db: &DatabaseConnection,
    session: &Session,
    kind: EntryKind,
    amount: f64,
) -> Result<ledger_entry::Model> {
    session.require(Capability::RecordTransactions)?;

    let amount = if amount.is_finite() {
        round_cents(amount)
    } else {
        amount
    };
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation(format!(
            "Amount must be greater than zero (got {amount})"
        )));
    }

    let entry = ledger_entry::ActiveModel {
        kind: Set(kind),
        amount: Set(amount),
        entry_date: Set(Local::now().date_naive()),
        recorded_at: Set(Utc::now()),
        recorded_by: Set(session.account_id),
        ..Default::default()
    };
    let entry = entry.insert(db).await?;
    info!(
        "Recorded {:?} of {} (entry ID: {})",
        entry.kind,
        report::format_money(entry.amount),
        entry.id
    );
    Ok(entry)
}

/// Lists every ledger entry, newest first.
///
/// # Errors
/// Returns an error if the session may not view financials or the query fails.
pub async fn list_transactions(
    db: &DatabaseConnection,
    session: &Session,
) -> Result<Vec<ledger_entry::Model>> {
    session.require(Capability::ViewFinancials)?;
    LedgerEntry::find()
        .order_by_desc(ledger_entry::Column::RecordedAt)
        .order_by_desc(ledger_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sum of all entries of one kind; zero when there are none.
pub(crate) async fn total_for(db: &DatabaseConnection, kind: EntryKind) -> Result<f64> {
    let total: Option<Option<f64>> = LedgerEntry::find()
        .select_only()
        .column_as(ledger_entry::Column::Amount.sum(), "total")
        .filter(ledger_entry::Column::Kind.eq(kind))
        .into_tuple()
        .one(db)
        .await?;
    let total = round_cents(total.flatten().unwrap_or(0.0));
    debug!("Ledger total for {:?}: {}", kind, total);
    Ok(total)
}

/// Cash-in and cash-out totals across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashTotals {
    /// Sum of cash-in entries
    pub cash_in: f64,
    /// Sum of cash-out entries
    pub cash_out: f64,
}

impl CashTotals {
    /// `cash_in - cash_out`, rounded to cents
    #[must_use]
    pub fn net(&self) -> f64 {
        round_cents(self.cash_in - self.cash_out)
    }
}

/// Totals both directions of the ledger.
///
/// # Errors
/// Returns an error if the session may not view financials or the aggregation fails.
pub async fn cash_totals(db: &DatabaseConnection, session: &Session) -> Result<CashTotals> {
    session.require(Capability::ViewFinancials)?;
    ledger_totals(db).await
}

async fn ledger_totals(db: &DatabaseConnection) -> Result<CashTotals> {
    Ok(CashTotals {
        cash_in: total_for(db, EntryKind::CashIn).await?,
        cash_out: total_for(db, EntryKind::CashOut).await?,
    })
}

fn summary_for_today(totals: CashTotals) -> FinancialSummary {
    FinancialSummary {
        date: Local::now().date_naive(),
        cash_in: totals.cash_in,
        cash_out: totals.cash_out,
        net_profit_loss: totals.net(),
    }
}

/// Net profit (positive) or loss (negative): total cash-in minus total cash-out.
/// Returns 0.00 for an empty ledger.
///
/// # Errors
/// Returns an error if the session may not view financials or the aggregation fails.
pub async fn net_profit_loss(db: &DatabaseConnection, session: &Session) -> Result<f64> {
    Ok(cash_totals(db, session).await?.net())
}

/// Builds today's financial summary from the current ledger.
///
/// # Errors
/// Returns an error if the session may not view financials or the aggregation fails.
pub async fn financial_summary(
    db: &DatabaseConnection,
    session: &Session,
) -> Result<FinancialSummary> {
    let totals = cash_totals(db, session).await?;
    Ok(summary_for_today(totals))
}

/// Builds today's financial summary and writes it to the report directory.
///
/// # Errors
/// Returns an error if the summary cannot be built or the file cannot be written.
pub async fn write_financial_summary(
    db: &DatabaseConnection,
    settings: &Settings,
    session: &Session,
) -> Result<(FinancialSummary, PathBuf)> {
    let summary = financial_summary(db, session).await?;
    let path = report::write_financial_summary(&settings.report_dir, &summary).await?;
    Ok((summary, path))
}

/// Writes today's financial summary as a system task, without a session.
///
/// This is what the binary runs at startup, alongside the low-inventory sweep, so the
/// report directory always holds a summary for the day the store was opened. It reads
/// the same totals as [`write_financial_summary`] and overwrites any summary already
/// written today. Interactive callers go through [`write_financial_summary`], which
/// checks the caller's role first.
///
/// # Errors
/// Returns an error if the ledger aggregation fails or the report cannot be written.
#[instrument(skip_all)]
pub async fn write_daily_financial_summary(
    db: &DatabaseConnection,
    settings: &Settings,
) -> Result<(FinancialSummary, PathBuf)> {
    let summary = summary_for_today(ledger_totals(db).await?);
    let path = report::write_financial_summary(&settings.report_dir, &summary).await?;
    info!("Daily financial summary written to {:?}", path);
    Ok((summary, path))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::Role;
    use crate::test_utils::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.005_1), 10.01);
        assert_eq!(round_cents(3.333), 3.33);
        assert_eq!(round_cents(-2.5), -2.5);
    }

    #[tokio::test]
    async fn test_net_profit_loss_empty_ledger() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;
        assert_eq!(net_profit_loss(&db, &manager).await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_net_profit_loss_mixed_entries() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;
        record_transaction(&db, &manager, EntryKind::CashIn, 100.0).await?;
        record_transaction(&db, &manager, EntryKind::CashOut, 40.0).await?;
        record_transaction(&db, &manager, EntryKind::CashIn, 10.0).await?;

        assert_eq!(net_profit_loss(&db, &manager).await?, 70.0);

        let totals = cash_totals(&db, &manager).await?;
        assert_eq!(totals.cash_in, 110.0);
        assert_eq!(totals.cash_out, 40.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_net_loss_is_negative() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;
        record_transaction(&db, &manager, EntryKind::CashIn, 5.5).await?;
        record_transaction(&db, &manager, EntryKind::CashOut, 20.25).await?;

        assert_eq!(net_profit_loss(&db, &manager).await?, -14.75);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_transaction_validation() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY, 0.001] {
            let result = record_transaction(&db, &manager, EntryKind::CashIn, bad).await;
            assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        }
        assert!(list_transactions(&db, &manager).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_record_transaction_stamps_actor_and_date() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;
        let cashier = create_test_session(&db, "till", Role::Cashier).await?;

        let entry = record_transaction(&db, &cashier, EntryKind::CashIn, 12.346).await?;
        assert_eq!(entry.recorded_by, cashier.account_id);
        assert_eq!(entry.amount, 12.35);
        assert_eq!(entry.entry_date, Local::now().date_naive());

        let entries = list_transactions(&db, &manager).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::CashIn);
        Ok(())
    }

    #[tokio::test]
    async fn test_cashier_cannot_view_financials() -> Result<()> {
        let (db, _settings, _dir, _manager) = setup_with_manager().await?;
        let cashier = create_test_session(&db, "till", Role::Cashier).await?;

        let result = net_profit_loss(&db, &cashier).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_financial_summary() -> Result<()> {
        let (db, settings, _dir, manager) = setup_with_manager().await?;
        record_transaction(&db, &manager, EntryKind::CashIn, 250.0).await?;
        record_transaction(&db, &manager, EntryKind::CashOut, 75.5).await?;

        let (summary, path) = write_financial_summary(&db, &settings, &manager).await?;
        assert_eq!(summary.net_profit_loss, 174.5);
        assert!(path.starts_with(&settings.report_dir));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("$250.00"));
        assert!(text.contains("$75.50"));
        assert!(text.contains("$174.50"));
        Ok(())
    }

    #[tokio::test]
    async fn test_daily_financial_summary_needs_no_session() -> Result<()> {
        let (db, settings, _dir, manager) = setup_with_manager().await?;
        record_transaction(&db, &manager, EntryKind::CashIn, 100.0).await?;
        record_transaction(&db, &manager, EntryKind::CashOut, 40.0).await?;

        let (summary, path) = write_daily_financial_summary(&db, &settings).await?;
        assert_eq!(summary.cash_in, 100.0);
        assert_eq!(summary.cash_out, 40.0);
        assert_eq!(summary.net_profit_loss, 60.0);
        assert_eq!(summary.date, Local::now().date_naive());

        // Same file as the session-bound writer, overwritten in place
        let (_, again) = write_financial_summary(&db, &settings, &manager).await?;
        assert_eq!(path, again);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("$60.00"));
        Ok(())
    }
}
