//! Tier management handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use showcase_access::{
    accessible_tiers, next_tier, previous_tier, TierChange, TierChangeAuthority,
};
use showcase_types::{Tier, UserId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TierResponse {
    pub user_id: String,
    pub tier: Tier,
    pub display_name: &'static str,
    pub next_tier: Option<Tier>,
    pub previous_tier: Option<Tier>,
    pub accessible_tiers: Vec<Tier>,
}

impl TierResponse {
    fn new(user_id: &UserId, tier: Tier) -> Self {
        Self {
            user_id: user_id.to_string(),
            tier,
            display_name: tier.display_name(),
            next_tier: next_tier(tier),
            previous_tier: previous_tier(tier),
            accessible_tiers: accessible_tiers(tier),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTierRequest {
    pub tier: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateTierResponse {
    pub user_id: String,
    pub previous_tier: Tier,
    pub new_tier: Tier,
}

impl UpdateTierResponse {
    fn new(user_id: &UserId, change: TierChange) -> Self {
        Self {
            user_id: user_id.to_string(),
            previous_tier: change.previous,
            new_tier: change.current,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/me/tier
///
/// Get the caller's current tier
pub async fn get_my_tier(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<TierResponse>> {
    let tier = state.service.current_tier(&auth_user.user_id).await?;
    Ok(Json(TierResponse::new(&auth_user.user_id, tier)))
}

/// POST /api/v1/me/tier/upgrade
///
/// Move the caller up one tier
pub async fn upgrade_my_tier(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<TierResponse>> {
    let change = state
        .service
        .upgrade(&auth_user.user_id, TierChangeAuthority::SelfService)
        .await?;
    Ok(Json(TierResponse::new(&auth_user.user_id, change.current)))
}

/// POST /api/v1/me/tier/downgrade
///
/// Move the caller down one tier
pub async fn downgrade_my_tier(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<TierResponse>> {
    let change = state
        .service
        .downgrade(&auth_user.user_id, TierChangeAuthority::SelfService)
        .await?;
    Ok(Json(TierResponse::new(&auth_user.user_id, change.current)))
}

/// PUT /api/v1/users/{subject}/tier (admin only)
///
/// Set any user's tier
pub async fn update_user_tier(
    State(state): State<AppState>,
    Path(subject): Path<String>,
    auth_user: AuthUser,
    Json(req): Json<UpdateTierRequest>,
) -> ApiResult<Json<UpdateTierResponse>> {
    if !auth_user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let new_tier: Tier = req
        .tier
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid tier: {}", req.tier)))?;

    let target_user_id = UserId::new(subject);
    let change = state
        .service
        .request_tier_change(&target_user_id, new_tier, TierChangeAuthority::Admin)
        .await?;

    tracing::info!(
        user_id = %target_user_id,
        previous_tier = %change.previous,
        new_tier = %change.current,
        admin_id = %auth_user.user_id,
        "Admin set user tier"
    );

    Ok(Json(UpdateTierResponse::new(&target_user_id, change)))
}
