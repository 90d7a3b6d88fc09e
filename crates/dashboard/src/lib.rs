pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod request_id;
pub mod seeder;

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use placeholder_data::Fixtures;
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    handlers::{health_check, not_found, seed},
    request_id::request_id_middleware,
    seeder::Seeder,
};

pub fn create_router(pool: PgPool, fixtures: Fixtures) -> Router {
    let seeder = Seeder::new(pool);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/seed", get(seed))
        .fallback(not_found)
        .layer(Extension(seeder))
        .layer(Extension(Arc::new(fixtures)))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(middleware::from_fn(request_id_middleware))
}

pub async fn run_server(pool: PgPool, fixtures: Fixtures, port: u16) -> anyhow::Result<()> {
    let app = create_router(pool, fixtures);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!("Server running on http://0.0.0.0:{port}");

    axum::serve(listener, app).await?;

    Ok(())
}
