use serde::{Deserialize, Serialize};

use super::super::domain::EventSnapshot;
use super::config::RegistrationPolicy;
use super::rules::ScheduleSignals;

/// Display classification driving badge styling in downstream clients.
/// Distinct from `can_register`; never consulted for business decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTier {
    Open,
    Filling,
    Closed,
    Full,
    InProgress,
    Ended,
    Unpublished,
}

impl DisplayTier {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Open,
            Self::Filling,
            Self::Closed,
            Self::Full,
            Self::InProgress,
            Self::Ended,
            Self::Unpublished,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filling => "filling",
            Self::Closed => "closed",
            Self::Full => "full",
            Self::InProgress => "in_progress",
            Self::Ended => "ended",
            Self::Unpublished => "unpublished",
        }
    }
}

/// Locale-neutral reason codes. Callers translate these into user-facing
/// text; the service never emits presentation strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKey {
    NotPublished,
    EventEnded,
    EventInProgress,
    RegistrationDisabled,
    DeadlinePassed,
    CapacityReached,
    LowAvailability,
    SpotsOpen,
}

impl ReasonKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotPublished => "not_published",
            Self::EventEnded => "event_ended",
            Self::EventInProgress => "event_in_progress",
            Self::RegistrationDisabled => "registration_disabled",
            Self::DeadlinePassed => "deadline_passed",
            Self::CapacityReached => "capacity_reached",
            Self::LowAvailability => "low_availability",
            Self::SpotsOpen => "spots_open",
        }
    }
}

/// Verdict for one `(snapshot, now)` pair. Constructed fresh per evaluation;
/// carries no identity or lifecycle beyond the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub can_register: bool,
    pub reason: ReasonKey,
    pub tier: DisplayTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spots_remaining: Option<u32>,
}

impl EligibilityResult {
    fn blocked(reason: ReasonKey, tier: DisplayTier) -> Self {
        Self {
            can_register: false,
            reason,
            tier,
            spots_remaining: None,
        }
    }
}

/// Ordered guard chain over the snapshot. The first matching rule wins;
/// later rules are moot once an earlier one fires, so the order here is the
/// contract.
pub(crate) fn decide(
    snapshot: &EventSnapshot,
    policy: &RegistrationPolicy,
    signals: &ScheduleSignals,
) -> EligibilityResult {
    if !snapshot.published {
        return EligibilityResult::blocked(ReasonKey::NotPublished, DisplayTier::Unpublished);
    }

    if signals.ended {
        return EligibilityResult::blocked(ReasonKey::EventEnded, DisplayTier::Ended);
    }

    if signals.in_progress {
        return EligibilityResult::blocked(ReasonKey::EventInProgress, DisplayTier::InProgress);
    }

    if !snapshot.registration_enabled {
        return EligibilityResult::blocked(ReasonKey::RegistrationDisabled, DisplayTier::Closed);
    }

    if signals.deadline_passed {
        return EligibilityResult::blocked(ReasonKey::DeadlinePassed, DisplayTier::Closed);
    }

    if signals.full {
        return EligibilityResult::blocked(ReasonKey::CapacityReached, DisplayTier::Full);
    }

    match (signals.spots_remaining, snapshot.max_participants) {
        (Some(spots), Some(max)) => {
            let filling =
                spots <= policy.low_spot_floor || (f64::from(spots) / f64::from(max)) < policy.low_spot_share;
            if filling {
                EligibilityResult {
                    can_register: true,
                    reason: ReasonKey::LowAvailability,
                    tier: DisplayTier::Filling,
                    spots_remaining: Some(spots),
                }
            } else {
                EligibilityResult {
                    can_register: true,
                    reason: ReasonKey::SpotsOpen,
                    tier: DisplayTier::Open,
                    spots_remaining: Some(spots),
                }
            }
        }
        _ => EligibilityResult {
            can_register: true,
            reason: ReasonKey::SpotsOpen,
            tier: DisplayTier::Open,
            spots_remaining: None,
        },
    }
}
