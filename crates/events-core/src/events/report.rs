use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::EventId;
use super::eligibility::{DisplayTier, EligibilityEngine};
use super::repository::EventRecord;

/// Aggregate registration picture across a set of events at one instant,
/// for operator dashboards and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationOutlook {
    pub evaluated_at: DateTime<Utc>,
    pub total_events: usize,
    pub open_for_registration: usize,
    pub tier_counts: Vec<TierCountEntry>,
    pub low_availability: Vec<LowAvailabilityEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierCountEntry {
    pub tier: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LowAvailabilityEntry {
    pub event_id: EventId,
    pub title: String,
    pub spots_remaining: u32,
}

pub fn registration_outlook(
    records: &[EventRecord],
    engine: &EligibilityEngine,
    now: DateTime<Utc>,
) -> RegistrationOutlook {
    let verdicts: Vec<_> = records
        .iter()
        .map(|record| (record, engine.evaluate(&record.snapshot, now)))
        .collect();

    let tier_counts = DisplayTier::ordered()
        .into_iter()
        .map(|tier| TierCountEntry {
            tier: tier.label(),
            count: verdicts
                .iter()
                .filter(|(_, verdict)| verdict.tier == tier)
                .count(),
        })
        .collect();

    let low_availability = verdicts
        .iter()
        .filter(|(_, verdict)| verdict.tier == DisplayTier::Filling)
        .filter_map(|(record, verdict)| {
            verdict.spots_remaining.map(|spots| LowAvailabilityEntry {
                event_id: record.id.clone(),
                title: record.title.clone(),
                spots_remaining: spots,
            })
        })
        .collect();

    RegistrationOutlook {
        evaluated_at: now,
        total_events: records.len(),
        open_for_registration: verdicts
            .iter()
            .filter(|(_, verdict)| verdict.can_register)
            .count(),
        tier_counts,
        low_availability,
    }
}
