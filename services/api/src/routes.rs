use crate::infra::{deserialize_optional_instant, AppState, OutlookState};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use events_core::events::{
    event_router, registration_outlook, EventCsvImporter, EventRegistrationService,
    EventRepository, LowAvailabilityEntry, RegistrationNotifier, TierCountEntry,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct OutlookRequest {
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub(crate) today: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutlookResponse {
    pub(crate) evaluated_at: DateTime<Utc>,
    pub(crate) data_source: OutlookDataSource,
    pub(crate) total_events: usize,
    pub(crate) open_for_registration: usize,
    pub(crate) tier_counts: Vec<TierCountEntry>,
    pub(crate) low_availability: Vec<LowAvailabilityEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutlookDataSource {
    Csv,
    Repository,
}

pub(crate) fn with_event_routes<R, N>(
    service: Arc<EventRegistrationService<R, N>>,
) -> axum::Router
where
    R: EventRepository + 'static,
    N: RegistrationNotifier + 'static,
{
    event_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/events/outlook",
            axum::routing::post(outlook_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn outlook_endpoint(
    Extension(state): Extension<OutlookState>,
    Json(payload): Json<OutlookRequest>,
) -> Response {
    let OutlookRequest { today, csv } = payload;

    let (records, data_source) = match csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            match EventCsvImporter::from_reader(reader) {
                Ok(records) => (records, OutlookDataSource::Csv),
                Err(error) => {
                    let payload = json!({ "error": error.to_string() });
                    return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
                }
            }
        }
        None => match state.repository.list() {
            Ok(records) => (records, OutlookDataSource::Repository),
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
            }
        },
    };

    let now = today.unwrap_or_else(Utc::now);
    let outlook = registration_outlook(&records, &state.engine, now);

    let response = OutlookResponse {
        evaluated_at: outlook.evaluated_at,
        data_source,
        total_events: outlook.total_events,
        open_for_registration: outlook.open_for_registration,
        tier_counts: outlook.tier_counts,
        low_availability: outlook.low_availability,
    };

    (StatusCode::OK, Json(response)).into_response()
}
