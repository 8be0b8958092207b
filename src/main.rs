//! Wings POS - store bootstrap
//!
//! Opens the durable store, running seed reconciliation and the write-back
//! once, and reports the state it will serve from.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wings_pos::config::LogFormat;
use wings_pos::{Config, FileSlot, SalesPeriod, SeedCatalog, Store};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wings_pos=debug".into());

    match format {
        LogFormat::Plain => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        "Opening store {} in {} ({})",
        config.store_key,
        config.data_dir.display(),
        config.environment
    );

    let slot = FileSlot::new(&config.data_dir, &config.store_key);
    let (store, _report) = Store::open(slot, &SeedCatalog::default_catalog())?;

    let quarantined = store.repository().slot().quarantined_paths()?;
    if let Some(latest) = quarantined.last() {
        tracing::warn!(
            "{} undecodable store blob(s) set aside, latest at {}",
            quarantined.len(),
            latest.display()
        );
    }

    let summary = store.dashboard(config.low_stock_threshold);
    tracing::info!(
        "Store ready: {} products, {} units in stock, {} low on stock, revenue {}",
        summary.total_products,
        summary.total_stock_units,
        summary.low_stock_count,
        summary.total_revenue
    );

    let today = store.sales_report(SalesPeriod::Daily);
    tracing::info!("Today: {} sales, {}", today.sales.len(), today.total);

    for product in store.low_stock(config.low_stock_threshold) {
        tracing::warn!("Low stock: {} ({}) has {} left", product.name, product.id, product.quantity);
    }

    Ok(())
}
