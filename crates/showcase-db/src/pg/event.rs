//! PostgreSQL event repository implementation

use async_trait::async_trait;
use showcase_types::{Event, EventId, NewEvent, Tier};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::EventRow;
use crate::repo::EventRepository;
use crate::seed::SeedOutcome;

/// Advisory lock key held while seeding
const SEED_LOCK_KEY: i64 = 0x5EED_0001;

/// PostgreSQL event repository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_events(rows: Vec<EventRow>) -> DbResult<Vec<Event>> {
    rows.into_iter().map(Event::try_from).collect()
}

async fn insert_rows(conn: &mut PgConnection, events: &[NewEvent]) -> DbResult<Vec<Event>> {
    let mut inserted = Vec::with_capacity(events.len());

    for event in events {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (id, title, description, event_date, image_url, location, tier)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, event_date, image_url, location, tier, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(&event.image_url)
        .bind(&event.location)
        .bind(event.tier.as_str())
        .fetch_one(&mut *conn)
        .await?;

        inserted.push(Event::try_from(row)?);
    }

    Ok(inserted)
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn list(&self) -> DbResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, event_date, image_url, location, tier, created_at
            FROM events
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_events(rows)
    }

    async fn list_by_tiers(&self, tiers: &[Tier]) -> DbResult<Vec<Event>> {
        if tiers.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = tiers.iter().map(|t| t.as_str().to_string()).collect();

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, event_date, image_url, location, tier, created_at
            FROM events
            WHERE tier = ANY($1)
            ORDER BY event_date ASC, id ASC
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        into_events(rows)
    }

    async fn find_by_id(&self, id: EventId) -> DbResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, event_date, image_url, location, tier, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_many(&self, events: &[NewEvent]) -> DbResult<Vec<Event>> {
        let mut tx = self.pool.begin().await?;
        let inserted = insert_rows(&mut *tx, events).await?;
        tx.commit().await.map_err(DbError::from)?;

        Ok(inserted)
    }

    async fn insert_many_if_empty(&self, events: &[NewEvent]) -> DbResult<SeedOutcome> {
        let mut tx = self.pool.begin().await?;

        // Held until commit or rollback, so concurrent seeders run one at a time
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SEED_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(SeedOutcome::AlreadySeeded { existing });
        }

        let inserted = insert_rows(&mut *tx, events).await?;
        tx.commit().await.map_err(DbError::from)?;

        Ok(SeedOutcome::Seeded {
            inserted: inserted.len(),
        })
    }
}
