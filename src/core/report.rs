//! Financial and tax summary documents.
//!
//! Summaries are plain-text pages named after the day they were produced. Writing a
//! summary twice on the same day replaces the earlier file.

use crate::errors::Result;
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

const PAGE_WIDTH: usize = 48;

/// Ledger totals at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    /// Day the summary was produced
    pub date: NaiveDate,
    /// Sum of all cash-in entries
    pub cash_in: f64,
    /// Sum of all cash-out entries
    pub cash_out: f64,
    /// `cash_in - cash_out`
    pub net_profit_loss: f64,
}

/// Figures printed on a tax filing.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxSummary {
    /// Filing date
    pub date: NaiveDate,
    /// Total cash-in the rate was applied to
    pub total_sales: f64,
    /// Rate as a fraction in `[0, 1]`
    pub tax_rate: f64,
    /// Computed deductible amount
    pub deductible_amount: f64,
}

/// Formats an amount as dollars with two decimals, e.g. `$12.50` or `-$3.00`.
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

fn push_row(page: &mut String, label: &str, value: &str) {
    let padding = PAGE_WIDTH.saturating_sub(label.len() + value.len());
    let _ = writeln!(page, "{label}{}{value}", " ".repeat(padding));
}

fn page(title: &str, date: NaiveDate, rows: &[(&str, String)]) -> String {
    let rule = "=".repeat(PAGE_WIDTH);
    let mut page = String::new();
    let _ = writeln!(page, "{rule}");
    let _ = writeln!(page, "{title:^width$}", width = PAGE_WIDTH);
    let _ = writeln!(page, "{rule}");
    push_row(&mut page, "Date:", &date.format("%Y-%m-%d").to_string());
    let _ = writeln!(page, "{}", "-".repeat(PAGE_WIDTH));
    for (label, value) in rows {
        push_row(&mut page, label, value);
    }
    let _ = writeln!(page, "{rule}");
    let _ = writeln!(page, "{:>width$}", "Page 1 of 1", width = PAGE_WIDTH);
    page
}

/// Renders the financial summary page.
#[must_use]
pub fn render_financial_summary(summary: &FinancialSummary) -> String {
    page(
        "FINANCIAL SUMMARY",
        summary.date,
        &[
            ("Cash in:", format_money(summary.cash_in)),
            ("Cash out:", format_money(summary.cash_out)),
            ("Net profit/loss:", format_money(summary.net_profit_loss)),
        ],
    )
}

/// Renders the tax summary page.
#[must_use]
pub fn render_tax_summary(summary: &TaxSummary) -> String {
    page(
        "TAX SUMMARY",
        summary.date,
        &[
            ("Total sales:", format_money(summary.total_sales)),
            ("Tax rate:", format!("{:.2}%", summary.tax_rate * 100.0)),
            ("Deductible amount:", format_money(summary.deductible_amount)),
        ],
    )
}

/// Path of the financial summary for `date` inside `report_dir`.
#[must_use]
pub fn financial_summary_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!("financial_summary_{}.txt", date.format("%Y-%m-%d")))
}

/// Path of the tax summary for `date` inside `report_dir`.
#[must_use]
pub fn tax_summary_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!("tax_summary_{}.txt", date.format("%Y-%m-%d")))
}

/// Writes the financial summary, replacing any file from earlier the same day.
pub async fn write_financial_summary(
    report_dir: &Path,
    summary: &FinancialSummary,
) -> Result<PathBuf> {
    let path = financial_summary_path(report_dir, summary.date);
    write_document(&path, &render_financial_summary(summary)).await?;
    Ok(path)
}

/// Writes the tax summary, replacing any file from earlier the same day.
pub async fn write_tax_summary(report_dir: &Path, summary: &TaxSummary) -> Result<PathBuf> {
    let path = tax_summary_path(report_dir, summary.date);
    write_document(&path, &render_tax_summary(summary)).await?;
    Ok(path)
}

async fn write_document(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    info!("Wrote report {:?}", path);
    Ok(())
}
