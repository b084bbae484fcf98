//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use showcase_types::{Event, EventId, NewEvent, Tier, UserId};

use crate::error::DbResult;
use crate::models::UserRow;
use crate::seed::SeedOutcome;

/// User tier store
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by identity provider subject
    async fn find_by_subject(&self, subject: &UserId) -> DbResult<Option<UserRow>>;

    /// Overwrite the user's tier, creating the user record if needed
    async fn set_tier(&self, subject: &UserId, tier: Tier) -> DbResult<UserRow>;

    /// Delete a user
    async fn delete(&self, subject: &UserId) -> DbResult<()>;
}

/// Event store
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events, ordered by event date ascending
    async fn list(&self) -> DbResult<Vec<Event>>;

    /// Events whose tier is one of `tiers`, ordered by event date ascending
    async fn list_by_tiers(&self, tiers: &[Tier]) -> DbResult<Vec<Event>>;

    /// Find an event by ID
    async fn find_by_id(&self, id: EventId) -> DbResult<Option<Event>>;

    /// Number of stored events
    async fn count(&self) -> DbResult<i64>;

    /// Insert events in a single transaction
    async fn insert_many(&self, events: &[NewEvent]) -> DbResult<Vec<Event>>;

    /// Insert events only if the store holds none
    ///
    /// The emptiness check and the insert are atomic with respect to other
    /// callers of this method.
    async fn insert_many_if_empty(&self, events: &[NewEvent]) -> DbResult<SeedOutcome>;
}
