//! Admin maintenance handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use showcase_db::seed::{seed_if_empty, SeedOutcome};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: i64,
}

/// POST /api/v1/admin/seed (admin only)
///
/// Load the sample events into an empty store
pub async fn seed_events(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<(StatusCode, Json<SeedResponse>)> {
    if !auth_user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let outcome = seed_if_empty(state.service.events()).await?;
    tracing::info!(admin_id = %auth_user.user_id, ?outcome, "Seed requested");

    let response = match outcome {
        SeedOutcome::AlreadySeeded { existing } => (
            StatusCode::OK,
            Json(SeedResponse {
                message: "Events already seeded".to_string(),
                count: existing,
            }),
        ),
        SeedOutcome::Seeded { inserted } => (
            StatusCode::CREATED,
            Json(SeedResponse {
                message: "Sample events seeded".to_string(),
                count: inserted as i64,
            }),
        ),
    };

    Ok(response)
}
