//! Mock repositories for testing

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use dashmap::DashMap;
use showcase_db::seed::SeedOutcome;
use showcase_db::{DbError, DbResult, EventRepository, UserRepository, UserRow};
use showcase_types::{Event, EventId, NewEvent, Tier, UserId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::oneshot;
use uuid::Uuid;

/// Pause point for one `find_by_subject` call
struct ReadGate {
    snapshot_taken: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// In-memory user tier store for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<UserId, UserRow>>,
    fail_writes: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
    read_gate: Arc<Mutex<Option<ReadGate>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user with an optional stored tier
    pub fn insert_user(&self, subject: &str, tier: Option<&str>) {
        self.users.insert(
            UserId::from(subject),
            UserRow {
                subject: subject.to_string(),
                email: Some(format!("{subject}@example.com")),
                tier: tier.map(String::from),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
    }

    /// Make every subsequent `set_tier` fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `find_by_subject` calls so far
    #[allow(dead_code)]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Hold the next `find_by_subject` after it has copied the row
    ///
    /// Returns a receiver that fires once the row is copied and a sender
    /// that lets the read return it.
    #[allow(dead_code)]
    pub fn hold_next_read(&self) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (snapshot_taken, taken_rx) = oneshot::channel();
        let (release_tx, release) = oneshot::channel();
        *self.read_gate.lock().unwrap() = Some(ReadGate {
            snapshot_taken,
            release,
        });
        (taken_rx, release_tx)
    }

    /// Tier currently stored
    #[allow(dead_code)]
    pub fn stored_tier(&self, subject: &str) -> Option<String> {
        self.users
            .get(&UserId::from(subject))
            .and_then(|r| r.tier.clone())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_subject(&self, subject: &UserId) -> DbResult<Option<UserRow>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let row = self.users.get(subject).map(|r| r.value().clone());

        let gate = self.read_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.snapshot_taken.send(());
            let _ = gate.release.await;
        }

        Ok(row)
    }

    async fn set_tier(&self, subject: &UserId, tier: Tier) -> DbResult<UserRow> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        let mut entry = self.users.entry(subject.clone()).or_insert_with(|| UserRow {
            subject: subject.to_string(),
            email: None,
            tier: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        entry.tier = Some(tier.to_string());
        entry.updated_at = Utc::now();

        Ok(entry.value().clone())
    }

    async fn delete(&self, subject: &UserId) -> DbResult<()> {
        self.users.remove(subject);
        Ok(())
    }
}

/// Build a test event with a deterministic date offset
pub fn event(day: i64, tier: Tier) -> Event {
    let base = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
    Event {
        id: EventId(Uuid::new_v4()),
        title: format!("{tier} event on day {day}"),
        description: "test event".to_string(),
        event_date: base + Duration::days(day),
        image_url: None,
        location: None,
        tier,
        created_at: Utc::now(),
    }
}

fn stored(events: &[NewEvent]) -> Vec<Event> {
    events
        .iter()
        .map(|e| Event {
            id: EventId::new(),
            title: e.title.clone(),
            description: e.description.clone(),
            event_date: e.event_date,
            image_url: e.image_url.clone(),
            location: e.location.clone(),
            tier: e.tier,
            created_at: Utc::now(),
        })
        .collect()
}

/// In-memory event store for testing
#[derive(Default, Clone)]
pub struct MockEventRepository {
    events: Arc<RwLock<Vec<Event>>>,
}

impl MockEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    fn sorted(&self) -> Vec<Event> {
        let mut events = self.events.read().unwrap().clone();
        events.sort_by_key(|e| e.event_date);
        events
    }
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn list(&self) -> DbResult<Vec<Event>> {
        Ok(self.sorted())
    }

    async fn list_by_tiers(&self, tiers: &[Tier]) -> DbResult<Vec<Event>> {
        Ok(self
            .sorted()
            .into_iter()
            .filter(|e| tiers.contains(&e.tier))
            .collect())
    }

    async fn find_by_id(&self, id: EventId) -> DbResult<Option<Event>> {
        Ok(self.events.read().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.events.read().unwrap().len() as i64)
    }

    async fn insert_many(&self, events: &[NewEvent]) -> DbResult<Vec<Event>> {
        let inserted = stored(events);
        self.events.write().unwrap().extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn insert_many_if_empty(&self, events: &[NewEvent]) -> DbResult<SeedOutcome> {
        let mut stored_events = self.events.write().unwrap();
        if !stored_events.is_empty() {
            return Ok(SeedOutcome::AlreadySeeded {
                existing: stored_events.len() as i64,
            });
        }

        stored_events.extend(stored(events));
        Ok(SeedOutcome::Seeded {
            inserted: events.len(),
        })
    }
}
