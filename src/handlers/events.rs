use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::store::{self, Db};
use crate::utils::error::AppError;
use crate::utils::response::success;

/// GET /api/events — upcoming events, soonest first.
pub async fn list_events(State(db): State<Db>) -> Result<Response, AppError> {
    let events = store::events::upcoming(&db).await?;

    Ok(success(events, "Upcoming events fetched").into_response())
}

/// GET /api/events/:id
pub async fn get_event(
    State(db): State<Db>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = store::events::find(&db, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", event_id)))?;

    Ok(success(event, "Event fetched").into_response())
}
