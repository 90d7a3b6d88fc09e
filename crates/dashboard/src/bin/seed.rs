//! Seeds the dashboard database once and exits.
//!
//! Run with:
//! ```
//! cargo run -p dashboard --bin seed [fixtures.json]
//! ```
//!
//! Without an argument the bundled placeholder data is used.

use anyhow::Context;
use dashboard::{config::AppConfig, database, seeder::Seeder};
use placeholder_data::Fixtures;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let fixtures = match std::env::args().nth(1) {
        Some(path) => Fixtures::from_json_file(&path)
            .with_context(|| format!("Failed to load fixtures from {path}"))?,
        None => Fixtures::placeholder(),
    };

    let config = AppConfig::from_env()?;
    let pool = database::connect(&config).await?;

    tracing::info!("Connected to database");

    let summary = Seeder::new(pool).seed(&fixtures).await?;

    tracing::info!("Seed completed!");
    tracing::info!("  Users: {}", summary.users);
    tracing::info!("  Customers: {}", summary.customers);
    tracing::info!("  Invoices: {}", summary.invoices);
    tracing::info!("  Revenue: {}", summary.revenue);

    Ok(())
}
