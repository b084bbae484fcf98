//! Sample event data
//!
//! Two events per tier, used to populate an empty store.

use chrono::{DateTime, TimeZone, Utc};
use showcase_types::{NewEvent, Tier};

use crate::error::DbResult;
use crate::repo::EventRepository;

/// Result of a seed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held this many events; nothing was inserted
    AlreadySeeded { existing: i64 },
    /// This many sample events were inserted
    Seeded { inserted: usize },
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The built-in sample events
pub fn sample_events() -> Vec<NewEvent> {
    vec![
        NewEvent::new(
            "Community Networking Mixer",
            "Join fellow professionals for an evening of casual networking and community building. Meet like-minded individuals and expand your professional circle.",
            at(2024, 2, 15, 18),
            Tier::Free,
        ),
        NewEvent::new(
            "Open Source Contributor Meetup",
            "Learn about contributing to open source projects and connect with maintainers. Perfect for beginners looking to make their first contribution.",
            at(2024, 2, 22, 19),
            Tier::Free,
        ),
        NewEvent::new(
            "Professional Development Workshop",
            "Advance your career with our intensive workshop covering modern development practices, leadership skills, and industry trends.",
            at(2024, 2, 20, 14),
            Tier::Silver,
        ),
        NewEvent::new(
            "Tech Leadership Masterclass",
            "Learn from seasoned tech leaders about building high-performing teams, strategic planning, and effective communication.",
            at(2024, 3, 5, 10),
            Tier::Silver,
        ),
        NewEvent::new(
            "Exclusive Industry Conference",
            "Join C-level executives and industry pioneers for cutting-edge insights, exclusive announcements, and premium networking opportunities.",
            at(2024, 3, 12, 9),
            Tier::Gold,
        ),
        NewEvent::new(
            "VIP Product Launch Event",
            "Be among the first to experience groundbreaking new products. Includes early access, exclusive demos, and direct feedback sessions.",
            at(2024, 3, 18, 16),
            Tier::Gold,
        ),
        NewEvent::new(
            "Private CEO Roundtable",
            "Intimate discussion with Fortune 500 CEOs about market trends, strategic insights, and future opportunities. Limited to 20 attendees.",
            at(2024, 3, 25, 15),
            Tier::Platinum,
        ),
        NewEvent::new(
            "Platinum Innovation Summit",
            "Ultra-exclusive summit featuring unreleased technologies, private investor meetings, and one-on-one mentorship sessions.",
            at(2024, 4, 2, 11),
            Tier::Platinum,
        ),
    ]
}

/// Insert the sample events if the store is empty
pub async fn seed_if_empty<E>(events: &E) -> DbResult<SeedOutcome>
where
    E: EventRepository + ?Sized,
{
    let outcome = events.insert_many_if_empty(&sample_events()).await?;

    match outcome {
        SeedOutcome::AlreadySeeded { existing } => {
            tracing::info!(existing, "Event store already seeded");
        }
        SeedOutcome::Seeded { inserted } => {
            tracing::info!(inserted, "Seeded sample events");
        }
    }

    Ok(outcome)
}
