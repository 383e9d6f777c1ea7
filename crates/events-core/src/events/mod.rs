//! Event intake, registration eligibility evaluation, and reporting.
//!
//! The eligibility engine is the decision core: a pure, ordered guard chain
//! over an event snapshot and a caller-supplied clock. Everything else in
//! this module is the plumbing that feeds it (intake, import) or consumes
//! its verdicts (service, router, report).

pub mod domain;
pub(crate) mod eligibility;
pub mod import;
pub mod intake;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{AttendeeDetails, EventId, EventSnapshot, RegistrationId, RegistrationRecord};
pub use eligibility::{
    DisplayTier, EligibilityEngine, EligibilityResult, ReasonKey, RegistrationPolicy,
};
pub use import::{EventCsvImporter, EventImportError};
pub use intake::{record_from_raw, snapshot_from_raw, RawEventRecord};
pub use report::{registration_outlook, LowAvailabilityEntry, RegistrationOutlook, TierCountEntry};
pub use repository::{
    EligibilityView, EventRecord, EventRepository, NotifierError, RegistrationNotice,
    RegistrationNotifier, RepositoryError,
};
pub use router::event_router;
pub use service::{EventRegistrationService, RegistrationError};
