use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::store::{self, Db};
use crate::utils::error::AppError;
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
pub struct CreateBookingPayload {
    pub user_name: Option<String>,
    pub event_id: Option<Uuid>,
    pub tickets_to_book: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CancelBookingPayload {
    pub user_name: Option<String>,
    pub booking_id: Option<Uuid>,
}

fn missing_booking_fields(payload: &CreateBookingPayload) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if payload.user_name.is_none() {
        missing.push("user_name");
    }
    if payload.event_id.is_none() {
        missing.push("event_id");
    }
    if payload.tickets_to_book.is_none() {
        missing.push("tickets_to_book");
    }
    missing
}

fn missing_cancel_fields(payload: &CancelBookingPayload) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if payload.user_name.is_none() {
        missing.push("user_name");
    }
    if payload.booking_id.is_none() {
        missing.push("booking_id");
    }
    missing
}

fn require_all(missing: Vec<&'static str>) -> Result<(), AppError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// POST /api/bookings — capacity check and decrement happen inside the
/// stored function, never here.
pub async fn create_booking(
    State(db): State<Db>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<Response, AppError> {
    require_all(missing_booking_fields(&payload))?;

    let user_name = payload.user_name.unwrap_or_default();
    let event_id = payload.event_id.unwrap_or_default();
    let tickets_to_book = payload.tickets_to_book.unwrap_or_default();

    let user = store::users::resolve(&db, &user_name).await?;
    let booking = store::bookings::book(&db, user.id, event_id, tickets_to_book).await?;

    info!(booking_id = %booking.id, %event_id, tickets_to_book, "Booking created");

    Ok(created(booking, "Booking created").into_response())
}

/// GET /api/bookings/:user — newest first. Looking up an unknown name
/// creates the user and returns an empty history.
pub async fn booking_history(
    State(db): State<Db>,
    Path(user_name): Path<String>,
) -> Result<Response, AppError> {
    let user = store::users::resolve(&db, &user_name).await?;
    let entries = store::bookings::history(&db, user.id).await?;

    Ok(success(entries, "Booking history fetched").into_response())
}

/// POST /api/bookings/cancel
pub async fn cancel_booking(
    State(db): State<Db>,
    Json(payload): Json<CancelBookingPayload>,
) -> Result<Response, AppError> {
    require_all(missing_cancel_fields(&payload))?;

    let user_name = payload.user_name.unwrap_or_default();
    let booking_id = payload.booking_id.unwrap_or_default();

    let user = store::users::resolve(&db, &user_name).await?;
    let tickets_released = store::bookings::cancel(&db, booking_id, user.id).await?;

    info!(%booking_id, tickets_released, "Booking cancelled");

    Ok(success(
        json!({ "booking_id": booking_id, "tickets_released": tickets_released }),
        "Booking cancelled",
    )
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_booking_fields_missing_are_listed() {
        let payload = CreateBookingPayload {
            user_name: None,
            event_id: None,
            tickets_to_book: None,
        };
        assert_eq!(
            missing_booking_fields(&payload),
            vec!["user_name", "event_id", "tickets_to_book"]
        );
    }

    #[test]
    fn test_missing_event_id_is_reported() {
        let payload = CreateBookingPayload {
            user_name: Some("ada".to_string()),
            event_id: None,
            tickets_to_book: Some(2),
        };
        assert_eq!(missing_booking_fields(&payload), vec!["event_id"]);
    }

    #[test]
    fn test_complete_booking_payload_passes() {
        let payload = CreateBookingPayload {
            user_name: Some("ada".to_string()),
            event_id: Some(Uuid::new_v4()),
            tickets_to_book: Some(2),
        };
        assert!(require_all(missing_booking_fields(&payload)).is_ok());
    }

    #[test]
    fn test_missing_fields_become_validation_error() {
        let err = require_all(vec!["booking_id"]).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cancel_payload_presence_check() {
        let payload = CancelBookingPayload {
            user_name: Some("ada".to_string()),
            booking_id: None,
        };
        assert_eq!(missing_cancel_fields(&payload), vec!["booking_id"]);
    }
}
