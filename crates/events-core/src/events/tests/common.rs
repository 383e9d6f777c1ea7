use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::events::domain::{AttendeeDetails, EventId, EventSnapshot};
use crate::events::eligibility::{EligibilityEngine, RegistrationPolicy};
use crate::events::repository::{
    EventRecord, EventRepository, NotifierError, RegistrationNotice, RegistrationNotifier,
    RepositoryError,
};
use crate::events::router::event_router;
use crate::events::service::EventRegistrationService;

/// Fixed evaluation instant used by all clock-pinned scenarios.
pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

pub(super) fn policy() -> RegistrationPolicy {
    RegistrationPolicy {
        low_spot_floor: 5,
        low_spot_share: 0.10,
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(policy())
}

/// Published, registration-enabled event starting `days_ahead` days after the
/// pinned clock, with unbounded capacity. Tests mutate what they need.
pub(super) fn upcoming_snapshot(days_ahead: i64) -> EventSnapshot {
    EventSnapshot {
        published: true,
        registration_enabled: true,
        event_date: Some(now() + Duration::days(days_ahead)),
        end_date: None,
        registration_deadline: None,
        current_participants: 0,
        max_participants: None,
    }
}

pub(super) fn event_record(id: &str, snapshot: EventSnapshot) -> EventRecord {
    EventRecord {
        id: EventId(id.to_string()),
        title: format!("Event {id}"),
        summary: None,
        snapshot,
        registrations: Vec::new(),
    }
}

/// Record anchored to the real clock, for router paths that bind `now` at
/// the HTTP edge.
pub(super) fn live_event_record(id: &str, max_participants: Option<u32>) -> EventRecord {
    let start = Utc::now() + Duration::days(30);
    event_record(
        id,
        EventSnapshot {
            published: true,
            registration_enabled: true,
            event_date: Some(start),
            end_date: Some(start + Duration::hours(6)),
            registration_deadline: Some(Utc::now() + Duration::days(20)),
            current_participants: 0,
            max_participants,
        },
    )
}

pub(super) fn attendee(email: &str) -> AttendeeDetails {
    AttendeeDetails {
        full_name: "Layla Hassan".to_string(),
        email: email.to_string(),
        phone: Some("+20-100-555-0199".to_string()),
        governorate: Some("Cairo".to_string()),
    }
}

pub(super) fn build_service() -> (
    EventRegistrationService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = EventRegistrationService::new(repository.clone(), notifier.clone(), policy());
    (service, repository, notifier)
}

pub(super) fn event_router_with_service(
    service: EventRegistrationService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    event_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EventId, EventRecord>>>,
}

impl EventRepository for MemoryRepository {
    fn insert(&self, record: EventRecord) -> Result<EventRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EventRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &EventId) -> Result<Option<EventRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<RegistrationNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<RegistrationNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl RegistrationNotifier for MemoryNotifier {
    fn publish(&self, notice: RegistrationNotice) -> Result<(), NotifierError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl EventRepository for UnavailableRepository {
    fn insert(&self, _record: EventRecord) -> Result<EventRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EventRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EventId) -> Result<Option<EventRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<EventRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingNotifier;

impl RegistrationNotifier for FailingNotifier {
    fn publish(&self, _notice: RegistrationNotice) -> Result<(), NotifierError> {
        Err(NotifierError::Transport("smtp relay unreachable".to_string()))
    }
}
