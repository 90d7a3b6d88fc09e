use std::sync::Arc;

use axum::{Extension, Json, http::StatusCode};
use placeholder_data::Fixtures;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{errors::AppError, seeder::Seeder};

pub const SEED_SUCCESS_MESSAGE: &str = "Database seeded successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Creates the dashboard tables if needed and inserts the placeholder data.
pub async fn seed(
    Extension(seeder): Extension<Seeder>,
    Extension(fixtures): Extension<Arc<Fixtures>>,
) -> Result<Json<SeedResponse>, AppError> {
    let summary = seeder.seed(&fixtures).await?;
    info!("Seed request completed: {summary}");

    Ok(Json(SeedResponse {
        message: SEED_SUCCESS_MESSAGE.to_string(),
    }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
