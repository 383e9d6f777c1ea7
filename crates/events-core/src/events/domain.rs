use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for events as issued by the content backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Identifier wrapper for accepted registrations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub String);

/// The subset of an event's stored fields relevant to registration
/// eligibility, normalized at intake. `None` dates mean the backend value was
/// absent or unparseable; the corresponding timeline rule simply does not
/// apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub published: bool,
    pub registration_enabled: bool,
    pub event_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub current_participants: u32,
    pub max_participants: Option<u32>,
}

impl EventSnapshot {
    /// Last instant of the event: `end_date`, falling back to `event_date`
    /// for single-instant events.
    pub fn effective_end(&self) -> Option<DateTime<Utc>> {
        self.end_date.or(self.event_date)
    }
}

/// Attendee details collected with a registration submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeDetails {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub governorate: Option<String>,
}

/// An accepted registration, stamped with the evaluation clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub id: RegistrationId,
    pub attendee: AttendeeDetails,
    pub registered_at: DateTime<Utc>,
}
