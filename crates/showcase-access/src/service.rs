//! Showcase service - ties together identity, tier storage, and the event store
//!
//! Every access decision is recomputed from the tier in the store. Nothing
//! tier-related is held between calls, so a confirmed write is visible to the
//! next read on every replica.

use std::sync::Arc;

use serde::Serialize;
use showcase_db::{EventRepository, UserRepository};
use showcase_types::{Event, EventId, Tier, UserId};

use crate::{
    access::{accessible_tiers, can_access, partition},
    config::AccessConfig,
    token::{IdentityClaims, TokenValidator},
    transition::{is_adjacent, next_tier, previous_tier, Direction},
    AccessError,
};

/// Who is asking for a tier change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierChangeAuthority {
    /// Administrator acting on any user; may set any tier
    Admin,
    /// The user acting on their own account; one step at a time
    SelfService,
}

/// Events split by what the user's tier unlocks
#[derive(Debug, Clone, Serialize)]
pub struct EventFeed {
    pub tier: Tier,
    pub next_tier: Option<Tier>,
    pub previous_tier: Option<Tier>,
    pub accessible: Vec<Event>,
    pub locked: Vec<Event>,
}

/// Events the user can see, with the tier that selected them
#[derive(Debug, Clone, Serialize)]
pub struct AccessibleEvents {
    pub tier: Tier,
    pub events: Vec<Event>,
}

/// Confirmed result of a tier change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierChange {
    /// Tier the change was authorised against
    pub previous: Tier,
    /// Tier the store holds after the write
    pub current: Tier,
}

/// Event access service
pub struct ShowcaseService<U: UserRepository, E: EventRepository> {
    config: AccessConfig,
    token_validator: TokenValidator,
    users: Arc<U>,
    events: Arc<E>,
}

impl<U: UserRepository, E: EventRepository> ShowcaseService<U, E> {
    /// Create a new showcase service
    pub fn new(config: AccessConfig, users: Arc<U>, events: Arc<E>) -> Self {
        Self {
            token_validator: TokenValidator::new(&config),
            users,
            events,
            config,
        }
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Event store backing this service
    pub fn events(&self) -> &E {
        &self.events
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Validate an identity provider token
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, AccessError> {
        self.token_validator.validate(token)
    }

    /// Get user's stored tier, `Free` when none is set
    pub async fn current_tier(&self, user_id: &UserId) -> Result<Tier, AccessError> {
        let row = self.users.find_by_subject(user_id).await?;
        let tier = row.as_ref().map(|r| r.tier()).transpose()?.flatten();
        Ok(tier.unwrap_or_default())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// All events, split into what the user can and cannot see
    pub async fn event_feed(&self, user_id: &UserId) -> Result<EventFeed, AccessError> {
        let tier = self.current_tier(user_id).await?;
        let events = self.events.list().await?;
        let split = partition(tier, events);

        tracing::debug!(
            user_id = %user_id,
            tier = %tier,
            accessible = split.accessible.len(),
            locked = split.locked.len(),
            "Built event feed"
        );

        Ok(EventFeed {
            tier,
            next_tier: next_tier(tier),
            previous_tier: previous_tier(tier),
            accessible: split.accessible,
            locked: split.locked,
        })
    }

    /// Only the events the user can see, filtered in the store
    pub async fn accessible_events(
        &self,
        user_id: &UserId,
    ) -> Result<AccessibleEvents, AccessError> {
        let tier = self.current_tier(user_id).await?;
        let events = self.events.list_by_tiers(&accessible_tiers(tier)).await?;
        Ok(AccessibleEvents { tier, events })
    }

    /// A single event, if the user's tier unlocks it
    pub async fn event(&self, user_id: &UserId, event_id: EventId) -> Result<Event, AccessError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AccessError::EventNotFound)?;

        let tier = self.current_tier(user_id).await?;
        if !can_access(tier, event.tier) {
            return Err(AccessError::EventLocked {
                required: event.tier,
            });
        }

        Ok(event)
    }

    // =========================================================================
    // Tier transitions
    // =========================================================================

    /// Move the user one tier up
    pub async fn upgrade(
        &self,
        user_id: &UserId,
        authority: TierChangeAuthority,
    ) -> Result<TierChange, AccessError> {
        self.step(user_id, Direction::Upgrade, authority).await
    }

    /// Move the user one tier down
    pub async fn downgrade(
        &self,
        user_id: &UserId,
        authority: TierChangeAuthority,
    ) -> Result<TierChange, AccessError> {
        self.step(user_id, Direction::Downgrade, authority).await
    }

    async fn step(
        &self,
        user_id: &UserId,
        direction: Direction,
        authority: TierChangeAuthority,
    ) -> Result<TierChange, AccessError> {
        let current = self.current_tier(user_id).await?;
        let target = direction
            .target(current)
            .ok_or(AccessError::NoTransition {
                from: current,
                direction,
            })?;

        self.change_tier(user_id, current, target, authority).await
    }

    /// Overwrite the user's tier and return the tier the store confirms
    ///
    /// A failed write leaves the stored tier as it was.
    pub async fn request_tier_change(
        &self,
        user_id: &UserId,
        new_tier: Tier,
        authority: TierChangeAuthority,
    ) -> Result<TierChange, AccessError> {
        let current = self.current_tier(user_id).await?;
        self.change_tier(user_id, current, new_tier, authority).await
    }

    async fn change_tier(
        &self,
        user_id: &UserId,
        current: Tier,
        target: Tier,
        authority: TierChangeAuthority,
    ) -> Result<TierChange, AccessError> {
        let kind = transition_kind(current, target);

        if let Err(e) = authorize(&self.config, authority, current, target) {
            tracing::warn!(
                user_id = %user_id,
                current = %current,
                target = %target,
                ?authority,
                "Tier change rejected"
            );
            record_transition(kind, "forbidden");
            return Err(e);
        }

        let row = match self.users.set_tier(user_id, target).await {
            Ok(row) => row,
            Err(e) => {
                record_transition(kind, "error");
                return Err(e.into());
            }
        };

        // The row returned by the write is the confirmation
        let confirmed = row.tier()?.unwrap_or_default();

        tracing::info!(
            user_id = %user_id,
            previous_tier = %current,
            new_tier = %confirmed,
            ?authority,
            "User tier updated"
        );
        record_transition(kind, "ok");

        Ok(TierChange {
            previous: current,
            current: confirmed,
        })
    }
}

/// Check whether `authority` may move a user from `current` to `target`
fn authorize(
    config: &AccessConfig,
    authority: TierChangeAuthority,
    current: Tier,
    target: Tier,
) -> Result<(), AccessError> {
    match authority {
        TierChangeAuthority::Admin => Ok(()),
        TierChangeAuthority::SelfService if !config.self_service_tier_changes => Err(
            AccessError::TierChangeForbidden("self-service tier changes are disabled".to_string()),
        ),
        TierChangeAuthority::SelfService if !is_adjacent(current, target) => {
            Err(AccessError::TierChangeForbidden(format!(
                "cannot move from {current} to {target} in one step"
            )))
        }
        TierChangeAuthority::SelfService => Ok(()),
    }
}

fn transition_kind(current: Tier, target: Tier) -> &'static str {
    match target.cmp(&current) {
        std::cmp::Ordering::Greater => Direction::Upgrade.as_str(),
        std::cmp::Ordering::Less => Direction::Downgrade.as_str(),
        std::cmp::Ordering::Equal => "unchanged",
    }
}

fn record_transition(kind: &'static str, result: &'static str) {
    metrics::counter!(
        "tier_transitions_total",
        "direction" => kind,
        "result" => result
    )
    .increment(1);
}

impl<U: UserRepository, E: EventRepository> std::fmt::Debug for ShowcaseService<U, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowcaseService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
