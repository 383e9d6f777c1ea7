use chrono::{DateTime, NaiveDate, Utc};
use events_core::events::{
    EligibilityEngine, EventId, EventRecord, EventRepository, NotifierError, RegistrationNotice,
    RegistrationNotifier, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// State for the outlook endpoint, which evaluates either an uploaded CSV or
/// the live repository.
#[derive(Clone)]
pub(crate) struct OutlookState {
    pub(crate) repository: Arc<InMemoryEventRepository>,
    pub(crate) engine: Arc<EligibilityEngine>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventRepository {
    records: Arc<Mutex<HashMap<EventId, EventRecord>>>,
}

impl EventRepository for InMemoryEventRepository {
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
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(crate) struct InMemoryRegistrationNotifier {
    notices: Arc<Mutex<Vec<RegistrationNotice>>>,
}

impl RegistrationNotifier for InMemoryRegistrationNotifier {
    fn publish(&self, notice: RegistrationNotice) -> Result<(), NotifierError> {
        let mut guard = self.notices.lock().expect("notifier mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryRegistrationNotifier {
    pub(crate) fn notices(&self) -> Vec<RegistrationNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!(
        "failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"
    ))
}

pub(crate) fn deserialize_optional_instant<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_instant(&value).map_err(serde::de::Error::custom))
        .transpose()
}
