use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{AttendeeDetails, EventId, RegistrationId, RegistrationRecord};
use super::eligibility::{EligibilityEngine, EligibilityResult, RegistrationPolicy};
use super::repository::{
    EligibilityView, EventRecord, EventRepository, NotifierError, RegistrationNotice,
    RegistrationNotifier, RepositoryError,
};

/// Service composing the repository, confirmation notifier, and eligibility
/// engine. All clock-dependent operations take `now` from the caller.
pub struct EventRegistrationService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: Arc<EligibilityEngine>,
}

static REGISTRATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_registration_id() -> RegistrationId {
    let id = REGISTRATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RegistrationId(format!("reg-{id:06}"))
}

impl<R, N> EventRegistrationService<R, N>
where
    R: EventRepository + 'static,
    N: RegistrationNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, policy: RegistrationPolicy) -> Self {
        Self {
            repository,
            notifier,
            engine: Arc::new(EligibilityEngine::new(policy)),
        }
    }

    /// Store a freshly normalized event record.
    pub fn create_event(&self, record: EventRecord) -> Result<EventRecord, RegistrationError> {
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Evaluate the current registration verdict for an event.
    pub fn eligibility(
        &self,
        event_id: &EventId,
        now: DateTime<Utc>,
    ) -> Result<EligibilityView, RegistrationError> {
        let record = self
            .repository
            .fetch(event_id)?
            .ok_or(RepositoryError::NotFound)?;
        let verdict = self.engine.evaluate(&record.snapshot, now);
        Ok(record.eligibility_view(&verdict))
    }

    /// Accept a registration if the event is currently open.
    ///
    /// The verdict is computed before anything is written; a blocked verdict
    /// rejects the submission and carries the evaluated result so callers
    /// can surface the reason code.
    pub fn register(
        &self,
        event_id: &EventId,
        attendee: AttendeeDetails,
        now: DateTime<Utc>,
    ) -> Result<(RegistrationRecord, EligibilityResult), RegistrationError> {
        let mut record = self
            .repository
            .fetch(event_id)?
            .ok_or(RepositoryError::NotFound)?;

        let verdict = self.engine.evaluate(&record.snapshot, now);
        if !verdict.can_register {
            return Err(RegistrationError::NotOpen(verdict));
        }

        let duplicate = record
            .registrations
            .iter()
            .any(|existing| existing.attendee.email.eq_ignore_ascii_case(&attendee.email));
        if duplicate {
            return Err(RegistrationError::DuplicateAttendee);
        }

        let registration = RegistrationRecord {
            id: next_registration_id(),
            attendee,
            registered_at: now,
        };

        record.registrations.push(registration.clone());
        record.snapshot.current_participants =
            record.snapshot.current_participants.saturating_add(1);
        self.repository.update(record)?;

        let mut details = BTreeMap::new();
        details.insert("tier".to_string(), verdict.tier.label().to_string());
        if let Some(spots) = verdict.spots_remaining {
            details.insert("spots_remaining".to_string(), spots.to_string());
        }
        self.notifier.publish(RegistrationNotice {
            template: "registration_confirmed".to_string(),
            event_id: event_id.clone(),
            registration_id: registration.id.clone(),
            details,
        })?;

        Ok((registration, verdict))
    }

    /// Fetch the stored record for API responses.
    pub fn get(&self, event_id: &EventId) -> Result<EventRecord, RegistrationError> {
        let record = self
            .repository
            .fetch(event_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration is not open: {}", .0.reason.label())]
    NotOpen(EligibilityResult),
    #[error("attendee already registered for this event")]
    DuplicateAttendee,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notifier(#[from] NotifierError),
}
