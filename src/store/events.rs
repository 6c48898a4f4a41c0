use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Event, EventAnalytics};
use crate::store::Db;
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str =
    "id, name, venue, start_time, end_time, capacity, tickets_sold, created_at, updated_at";

pub struct NewEvent {
    pub name: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub capacity: i32,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.venue.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.capacity.is_none()
    }
}

pub async fn upcoming(db: &Db) -> Result<Vec<Event>, AppError> {
    let events = sqlx::query_as::<_, Event>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE start_time > now()
         ORDER BY start_time ASC"
    ))
    .fetch_all(&db.pool)
    .await?;

    Ok(events)
}

pub async fn find(db: &Db, event_id: Uuid) -> Result<Option<Event>, AppError> {
    let event = sqlx::query_as::<_, Event>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
    ))
    .bind(event_id)
    .fetch_optional(&db.pool)
    .await?;

    Ok(event)
}

pub async fn create(db: &Db, new_event: NewEvent) -> Result<Event, AppError> {
    let event = sqlx::query_as::<_, Event>(&format!(
        "INSERT INTO events (name, venue, start_time, end_time, capacity)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {EVENT_COLUMNS}"
    ))
    .bind(new_event.name)
    .bind(new_event.venue)
    .bind(new_event.start_time)
    .bind(new_event.end_time)
    .bind(new_event.capacity)
    .fetch_one(&db.pool)
    .await?;

    Ok(event)
}

/// Returns `None` when no event has the given id.
pub async fn update(db: &Db, event_id: Uuid, patch: EventPatch) -> Result<Option<Event>, AppError> {
    let event = sqlx::query_as::<_, Event>(&format!(
        "UPDATE events SET
             name = COALESCE($2, name),
             venue = COALESCE($3, venue),
             start_time = COALESCE($4, start_time),
             end_time = COALESCE($5, end_time),
             capacity = COALESCE($6, capacity),
             updated_at = now()
         WHERE id = $1
         RETURNING {EVENT_COLUMNS}"
    ))
    .bind(event_id)
    .bind(patch.name)
    .bind(patch.venue)
    .bind(patch.start_time)
    .bind(patch.end_time)
    .bind(patch.capacity)
    .fetch_optional(&db.pool)
    .await?;

    Ok(event)
}

/// Unfiltered capacity/sold counters, all events including past ones.
pub async fn analytics(db: &Db) -> Result<Vec<EventAnalytics>, AppError> {
    let rows = sqlx::query_as::<_, EventAnalytics>(
        "SELECT id, name, venue, start_time, capacity, tickets_sold,
                capacity - tickets_sold AS tickets_remaining
         FROM events
         ORDER BY start_time ASC",
    )
    .fetch_all(&db.pool)
    .await?;

    Ok(rows)
}
