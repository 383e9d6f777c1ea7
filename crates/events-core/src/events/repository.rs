use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EventId, EventSnapshot, RegistrationId, RegistrationRecord};
use super::eligibility::EligibilityResult;

/// Repository record for a single event: the normalized snapshot plus the
/// registrations accepted so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub snapshot: EventSnapshot,
    #[serde(default)]
    pub registrations: Vec<RegistrationRecord>,
}

impl EventRecord {
    pub fn eligibility_view(&self, verdict: &EligibilityResult) -> EligibilityView {
        EligibilityView {
            event_id: self.id.clone(),
            title: self.title.clone(),
            can_register: verdict.can_register,
            reason: verdict.reason.label(),
            tier: verdict.tier.label(),
            spots_remaining: verdict.spots_remaining,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait EventRepository: Send + Sync {
    fn insert(&self, record: EventRecord) -> Result<EventRecord, RepositoryError>;
    fn update(&self, record: EventRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EventId) -> Result<Option<EventRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<EventRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound confirmation hook (e-mail adapter, webhook, dashboard feed).
pub trait RegistrationNotifier: Send + Sync {
    fn publish(&self, notice: RegistrationNotice) -> Result<(), NotifierError>;
}

/// Notice payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationNotice {
    pub template: String,
    pub event_id: EventId,
    pub registration_id: RegistrationId,
    pub details: BTreeMap<String, String>,
}

/// Notice dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("notice transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of an event's registration state for API
/// responses. Reason and tier stay locale-neutral codes.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityView {
    pub event_id: EventId,
    pub title: String,
    pub can_register: bool,
    pub reason: &'static str,
    pub tier: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spots_remaining: Option<u32>,
}
