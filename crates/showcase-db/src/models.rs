//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! Tier columns are stored as text and validated when converted to domain types.

use chrono::{DateTime, Utc};
use showcase_types::{Event, EventId, Tier, UserId};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub subject: String,
    pub email: Option<String>,
    pub tier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event row from the database
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub tier: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.subject.clone())
    }

    /// Stored tier, `None` when the attribute was never set
    pub fn tier(&self) -> DbResult<Option<Tier>> {
        self.tier.as_deref().map(parse_tier).transpose()
    }
}

impl TryFrom<EventRow> for Event {
    type Error = DbError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId(row.id),
            tier: parse_tier(&row.tier)?,
            title: row.title,
            description: row.description,
            event_date: row.event_date,
            image_url: row.image_url,
            location: row.location,
            created_at: row.created_at,
        })
    }
}

fn parse_tier(value: &str) -> DbResult<Tier> {
    value.parse().map_err(|_| {
        tracing::warn!(tier = value, "Unknown tier value in store");
        DbError::InvalidTier(value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_row(tier: &str) -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            title: "Community Networking Mixer".to_string(),
            description: "Casual networking".to_string(),
            event_date: Utc::now(),
            image_url: None,
            location: Some("Berlin".to_string()),
            tier: tier.to_string(),
            created_at: Utc::now(),
        }
    }

    fn user_row(tier: Option<&str>) -> UserRow {
        UserRow {
            subject: "user_2abc".to_string(),
            email: None,
            tier: tier.map(String::from),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_event_row_converts() {
        let row = event_row("gold");
        let id = row.id;
        let event = Event::try_from(row).unwrap();
        assert_eq!(event.id, EventId(id));
        assert_eq!(event.tier, Tier::Gold);
        assert_eq!(event.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_event_row_rejects_unknown_tier() {
        let err = Event::try_from(event_row("diamond")).unwrap_err();
        assert!(matches!(err, DbError::InvalidTier(t) if t == "diamond"));
    }

    #[test]
    fn test_user_row_tier() {
        assert_eq!(user_row(None).tier().unwrap(), None);
        assert_eq!(user_row(Some("silver")).tier().unwrap(), Some(Tier::Silver));
        assert!(user_row(Some("vip")).tier().is_err());
    }

    #[test]
    fn test_user_row_user_id() {
        assert_eq!(user_row(None).user_id(), UserId::from("user_2abc"));
    }
}
