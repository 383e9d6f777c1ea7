mod config;
mod policy;
mod rules;

pub use config::RegistrationPolicy;
pub use policy::{DisplayTier, EligibilityResult, ReasonKey};

use chrono::{DateTime, Utc};

use super::domain::EventSnapshot;
use policy::decide;

/// Stateless evaluator that applies the registration policy to an event
/// snapshot at a caller-supplied instant. The clock is always passed in so
/// tests can pin arbitrary "now" values.
pub struct EligibilityEngine {
    policy: RegistrationPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: RegistrationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RegistrationPolicy {
        &self.policy
    }

    pub fn evaluate(&self, snapshot: &EventSnapshot, now: DateTime<Utc>) -> EligibilityResult {
        let signals = rules::read_signals(snapshot, now);
        decide(snapshot, &self.policy, &signals)
    }
}
