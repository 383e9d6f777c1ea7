use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{AttendeeDetails, EventId};
use super::intake::{record_from_raw, RawEventRecord};
use super::repository::{EventRepository, RegistrationNotifier, RepositoryError};
use super::service::{EventRegistrationService, RegistrationError};

/// Router builder exposing HTTP endpoints for event intake, eligibility
/// checks, and registration submissions.
pub fn event_router<R, N>(service: Arc<EventRegistrationService<R, N>>) -> Router
where
    R: EventRepository + 'static,
    N: RegistrationNotifier + 'static,
{
    Router::new()
        .route("/api/v1/events", post(create_event_handler::<R, N>))
        .route(
            "/api/v1/events/:event_id/eligibility",
            get(eligibility_handler::<R, N>),
        )
        .route(
            "/api/v1/events/:event_id/registrations",
            post(register_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn create_event_handler<R, N>(
    State(service): State<Arc<EventRegistrationService<R, N>>>,
    axum::Json(raw): axum::Json<RawEventRecord>,
) -> Response
where
    R: EventRepository + 'static,
    N: RegistrationNotifier + 'static,
{
    let record = record_from_raw(raw);
    match service
        .create_event(record)
        .and_then(|stored| service.eligibility(&stored.id, Utc::now()))
    {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(RegistrationError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "event already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<R, N>(
    State(service): State<Arc<EventRegistrationService<R, N>>>,
    Path(event_id): Path<String>,
) -> Response
where
    R: EventRepository + 'static,
    N: RegistrationNotifier + 'static,
{
    let id = EventId(event_id);
    match service.eligibility(&id, Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(RegistrationError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "event not found", "event_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_handler<R, N>(
    State(service): State<Arc<EventRegistrationService<R, N>>>,
    Path(event_id): Path<String>,
    axum::Json(attendee): axum::Json<AttendeeDetails>,
) -> Response
where
    R: EventRepository + 'static,
    N: RegistrationNotifier + 'static,
{
    let id = EventId(event_id);
    match service.register(&id, attendee, Utc::now()) {
        Ok((registration, verdict)) => {
            let payload = json!({
                "registration_id": registration.id.0,
                "event_id": id.0,
                "tier": verdict.tier.label(),
                "spots_remaining": verdict.spots_remaining,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::NotOpen(verdict)) => {
            let payload = json!({
                "error": "registration is not open",
                "reason": verdict.reason.label(),
                "tier": verdict.tier.label(),
                "spots_remaining": verdict.spots_remaining,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::DuplicateAttendee) => {
            let payload = json!({ "error": "attendee already registered" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "event not found", "event_id": id.0 });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
