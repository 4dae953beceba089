use dotenvy::dotenv;
use retail_ledger::{
    config::{self, database},
    core::{ledger, monitor},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load store settings
    let settings = config::load_default_config()
        .inspect_err(|e| error!("Critical error loading configuration: {}", e))?;

    // 4. Connect and make sure the schema exists
    let database_url = database::get_database_url(&settings);
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to store: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Store initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Sweep the whole catalog once for items that ran low while we were down
    let notices = monitor::check_low_inventory(&db, &settings)
        .await
        .inspect_err(|e| error!("Startup low-inventory sweep failed: {}", e))?;
    info!(
        "Startup low-inventory sweep raised {} notification(s); log at {:?}",
        notices.len(),
        settings.notification_log
    );

    // 6. Write the day's financial summary
    let (summary, path) = ledger::write_daily_financial_summary(&db, &settings)
        .await
        .inspect_err(|e| error!("Failed to write financial summary: {}", e))?;
    info!(
        "Net profit/loss for {}: {:.2} ({:?})",
        summary.date, summary.net_profit_loss, path
    );

    Ok(())
}
