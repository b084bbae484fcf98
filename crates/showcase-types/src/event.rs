//! Event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Tier;

/// Unique event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new random event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an event ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Event as read from the event store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// When the event takes place
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    /// Minimum membership tier required to view the event
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}

/// Event to be inserted into the event store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub tier: Tier,
}

impl NewEvent {
    /// Create a new event without image or location
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        event_date: DateTime<Utc>,
        tier: Tier,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            event_date,
            image_url: None,
            location: None,
            tier,
        }
    }

    /// Set the image reference
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
