use dashboard::{config::AppConfig, database, run_server};
use placeholder_data::Fixtures;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    let pool = database::lazy_pool(&config)?;

    // Connectivity is only reported here; /seed surfaces its own failures.
    let probe = pool.clone();
    tokio::spawn(async move {
        match database::check_connection(&probe).await {
            Ok(now) => tracing::info!("Database connection successful (server time {now})"),
            Err(e) => tracing::error!("Database connection error: {e}"),
        }
    });

    run_server(pool, Fixtures::placeholder(), config.port).await
}
