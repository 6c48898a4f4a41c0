use uuid::Uuid;

use crate::models::{Booking, BookingHistoryEntry};
use crate::store::{map_procedure_error, Db};
use crate::utils::error::AppError;

/// Books tickets through the `book_tickets` stored function, which checks
/// remaining capacity and increments `tickets_sold` in one transaction.
/// This layer does no capacity accounting of its own.
pub async fn book(
    db: &Db,
    user_id: Uuid,
    event_id: Uuid,
    tickets_to_book: i32,
) -> Result<Booking, AppError> {
    let booking_id = sqlx::query_scalar::<_, Uuid>("SELECT book_tickets($1, $2, $3)")
        .bind(user_id)
        .bind(event_id)
        .bind(tickets_to_book)
        .fetch_one(&db.pool)
        .await
        .map_err(map_procedure_error)?;

    let booking = sqlx::query_as::<_, Booking>(
        "SELECT id, user_id, event_id, tickets_booked, created_at
         FROM bookings WHERE id = $1",
    )
    .bind(booking_id)
    .fetch_one(&db.pool)
    .await?;

    Ok(booking)
}

/// Bookings for one user joined with event summary fields, newest first.
pub async fn history(db: &Db, user_id: Uuid) -> Result<Vec<BookingHistoryEntry>, AppError> {
    let entries = sqlx::query_as::<_, BookingHistoryEntry>(
        "SELECT b.id, b.tickets_booked, b.created_at,
                e.id AS event_id, e.name AS event_name, e.venue, e.start_time
         FROM bookings b
         JOIN events e ON e.id = b.event_id
         WHERE b.user_id = $1
         ORDER BY b.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&db.pool)
    .await?;

    Ok(entries)
}

/// Cancels through the `cancel_booking` stored function, which zeroes the
/// booking and returns the released tickets to the event. Raises TK404 when
/// the booking is missing, owned by someone else, or already cancelled.
pub async fn cancel(db: &Db, booking_id: Uuid, user_id: Uuid) -> Result<i32, AppError> {
    let released = sqlx::query_scalar::<_, i32>("SELECT cancel_booking($1, $2)")
        .bind(booking_id)
        .bind(user_id)
        .fetch_one(&db.pool)
        .await
        .map_err(map_procedure_error)?;

    Ok(released)
}
