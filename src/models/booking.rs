use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A cancelled booking keeps its row; `tickets_booked` drops to zero.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub tickets_booked: i32,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with the event fields the history listing needs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingHistoryEntry {
    pub id: Uuid,
    pub tickets_booked: i32,
    pub created_at: DateTime<Utc>,
    pub event_id: Uuid,
    pub event_name: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
}
