use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{admin, bookings, events, health_check};
use crate::store::Db;

pub fn create_routes(db: Db) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(events::list_events))
        .route("/api/events/:id", get(events::get_event))
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/bookings/:user", get(bookings::booking_history))
        .route("/api/bookings/cancel", post(bookings::cancel_booking))
        .route("/api/admin/events", post(admin::create_event))
        .route("/api/admin/events/:id", put(admin::update_event))
        .route("/api/admin/analytics", get(admin::analytics))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(db)
}
