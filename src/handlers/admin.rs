use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::store::events::{EventPatch, NewEvent};
use crate::store::{self, Db};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

/// Sentinel identity for admin routes. Exact match only.
const ADMIN_SENTINEL: &str = "admin";

#[derive(Debug, Deserialize)]
pub struct CreateEventPayload {
    pub user: Option<String>,
    pub name: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventPayload {
    pub user: Option<String>,
    pub name: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub user: Option<String>,
}

/// The gate runs before any other validation or store call, so a non-admin
/// request is rejected no matter what else is wrong with it.
fn require_admin(user: Option<&str>) -> Result<(), AppError> {
    if user == Some(ADMIN_SENTINEL) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ))
    }
}

fn missing_event_fields(payload: &CreateEventPayload) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if payload.name.is_none() {
        missing.push("name");
    }
    if payload.venue.is_none() {
        missing.push("venue");
    }
    if payload.start_time.is_none() {
        missing.push("start_time");
    }
    if payload.end_time.is_none() {
        missing.push("end_time");
    }
    if payload.capacity.is_none() {
        missing.push("capacity");
    }
    missing
}

/// POST /api/admin/events
pub async fn create_event(
    State(db): State<Db>,
    Json(payload): Json<CreateEventPayload>,
) -> Result<Response, AppError> {
    require_admin(payload.user.as_deref())?;

    let missing = missing_event_fields(&payload);
    if !missing.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let new_event = NewEvent {
        name: payload.name.unwrap_or_default(),
        venue: payload.venue.unwrap_or_default(),
        start_time: payload.start_time.unwrap_or_default(),
        end_time: payload.end_time.unwrap_or_default(),
        capacity: payload.capacity.unwrap_or_default(),
    };

    let event = store::events::create(&db, new_event).await?;

    info!(event_id = %event.id, capacity = event.capacity, "Event created");

    Ok(created(event, "Event created").into_response())
}

/// PUT /api/admin/events/:id — updates only the provided fields.
pub async fn update_event(
    State(db): State<Db>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventPayload>,
) -> Result<Response, AppError> {
    require_admin(payload.user.as_deref())?;

    let patch = EventPatch {
        name: payload.name,
        venue: payload.venue,
        start_time: payload.start_time,
        end_time: payload.end_time,
        capacity: payload.capacity,
    };

    if patch.is_empty() {
        return Err(AppError::ValidationError(
            "No updatable fields provided".to_string(),
        ));
    }

    let event = store::events::update(&db, event_id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", event_id)))?;

    info!(event_id = %event.id, "Event updated");

    Ok(success(event, "Event updated").into_response())
}

/// GET /api/admin/analytics?user=admin
pub async fn analytics(
    State(db): State<Db>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, AppError> {
    require_admin(query.user.as_deref())?;

    let rows = store::events::analytics(&db).await?;

    Ok(success(rows, "Event analytics fetched").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_accepted() {
        assert!(require_admin(Some("admin")).is_ok());
    }

    #[test]
    fn test_missing_user_is_forbidden() {
        let err = require_admin(None).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_other_users_are_forbidden() {
        assert!(require_admin(Some("ada")).is_err());
    }

    #[test]
    fn test_sentinel_match_is_case_sensitive() {
        assert!(require_admin(Some("Admin")).is_err());
        assert!(require_admin(Some("ADMIN")).is_err());
    }

    #[test]
    fn test_event_presence_check_lists_every_gap() {
        let payload = CreateEventPayload {
            user: Some("admin".to_string()),
            name: Some("Rust Meetup".to_string()),
            venue: None,
            start_time: None,
            end_time: None,
            capacity: Some(100),
        };
        assert_eq!(
            missing_event_fields(&payload),
            vec!["venue", "start_time", "end_time"]
        );
    }
}
