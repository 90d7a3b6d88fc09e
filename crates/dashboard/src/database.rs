use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use time::OffsetDateTime;

use crate::config::AppConfig;

fn connect_options(config: &AppConfig) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(config
        .database_url
        .parse::<PgConnectOptions>()?
        .ssl_mode(config.ssl_mode))
}

/// Builds a pool that opens connections on first use.
pub fn lazy_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(connect_options(config)?))
}

/// Builds a pool and opens its first connection immediately.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options(config)?)
        .await
}

/// Round-trips a trivial query, returning the server's clock.
pub async fn check_connection(pool: &PgPool) -> Result<OffsetDateTime, sqlx::Error> {
    let (now,): (OffsetDateTime,) = sqlx::query_as("SELECT NOW()").fetch_one(pool).await?;
    Ok(now)
}
