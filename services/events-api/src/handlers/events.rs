//! Event listing handlers

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use showcase_access::required_tier;
use showcase_types::{Event, EventId, Tier};

use super::shared::record_op_duration;
use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct EventFeedResponse {
    pub tier: Tier,
    pub next_tier: Option<Tier>,
    pub previous_tier: Option<Tier>,
    pub accessible: Vec<Event>,
    pub locked: Vec<LockedEvent>,
}

/// Event the caller cannot open yet
#[derive(Debug, Serialize)]
pub struct LockedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub required_tier: Tier,
}

#[derive(Debug, Serialize)]
pub struct AccessibleEventsResponse {
    pub tier: Tier,
    pub count: usize,
    pub events: Vec<Event>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/events
///
/// All events, split into accessible and locked for the caller's tier
pub async fn list_events(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<EventFeedResponse>> {
    let start = Instant::now();
    let result = state.service.event_feed(&auth_user.user_id).await;
    record_op_duration("event_feed", start, result.is_ok());

    let feed = result?;
    let locked = feed
        .locked
        .into_iter()
        .map(|event| LockedEvent {
            required_tier: required_tier(feed.tier, event.tier).unwrap_or(event.tier),
            event,
        })
        .collect();

    Ok(Json(EventFeedResponse {
        tier: feed.tier,
        next_tier: feed.next_tier,
        previous_tier: feed.previous_tier,
        accessible: feed.accessible,
        locked,
    }))
}

/// GET /api/v1/events/accessible
///
/// Only the events the caller's tier unlocks
pub async fn list_accessible_events(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<AccessibleEventsResponse>> {
    let start = Instant::now();
    let result = state.service.accessible_events(&auth_user.user_id).await;
    record_op_duration("accessible_events", start, result.is_ok());

    let accessible = result?;
    Ok(Json(AccessibleEventsResponse {
        tier: accessible.tier,
        count: accessible.events.len(),
        events: accessible.events,
    }))
}

/// GET /api/v1/events/{id}
///
/// A single event, if the caller's tier unlocks it
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    auth_user: AuthUser,
) -> ApiResult<Json<Event>> {
    let event_id = EventId::parse(&event_id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid event id: {event_id}")))?;

    let event = state.service.event(&auth_user.user_id, event_id).await?;
    Ok(Json(event))
}
