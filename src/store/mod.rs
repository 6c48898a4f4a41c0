use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::utils::error::AppError;

pub mod bookings;
pub mod events;
pub mod users;

/// SQLSTATEs raised by the booking stored functions. These are the whole
/// error contract between the service and the database; no message matching.
const SQLSTATE_INVALID_BOOKING: &str = "TK400";
const SQLSTATE_BOOKING_NOT_FOUND: &str = "TK404";
const SQLSTATE_CAPACITY_EXHAUSTED: &str = "TK409";

/// Connection handle to the Postgres store. Cloneable; shared as axum state.
#[derive(Clone)]
pub struct Db {
    pub pool: PgPool,
}

impl Db {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    /// Pool that defers connecting until first use. Lets router tests exercise
    /// paths that never reach the database.
    #[cfg(test)]
    pub(crate) fn connect_lazy(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new().connect_lazy(connection_string)?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!().run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }
}

fn app_error_for_sqlstate(code: &str, message: &str) -> Option<AppError> {
    match code {
        SQLSTATE_INVALID_BOOKING => Some(AppError::ValidationError(message.to_string())),
        SQLSTATE_BOOKING_NOT_FOUND => Some(AppError::NotFound(message.to_string())),
        SQLSTATE_CAPACITY_EXHAUSTED => Some(AppError::Conflict(message.to_string())),
        _ => None,
    }
}

/// Translates the stored functions' SQLSTATEs into the error taxonomy;
/// anything unrecognised stays a generic database error.
pub(crate) fn map_procedure_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            if let Some(app_err) = app_error_for_sqlstate(&code, db_err.message()) {
                return app_err;
            }
        }
    }
    AppError::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_capacity_sqlstate_maps_to_conflict() {
        let err = app_error_for_sqlstate(SQLSTATE_CAPACITY_EXHAUSTED, "sold out").unwrap();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_sqlstate_maps_to_404() {
        let err = app_error_for_sqlstate(SQLSTATE_BOOKING_NOT_FOUND, "no such booking").unwrap();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_booking_sqlstate_maps_to_400() {
        let err = app_error_for_sqlstate(SQLSTATE_INVALID_BOOKING, "unknown event").unwrap();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_foreign_sqlstates_are_not_classified() {
        // Ordinary Postgres codes must fall through to the 500 path.
        assert!(app_error_for_sqlstate("23505", "duplicate key").is_none());
        assert!(app_error_for_sqlstate("P0001", "raise_exception").is_none());
    }

    #[test]
    fn test_non_database_errors_stay_generic() {
        let err = map_procedure_error(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
