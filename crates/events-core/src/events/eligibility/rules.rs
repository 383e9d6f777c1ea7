use chrono::{DateTime, Utc};

use super::super::domain::EventSnapshot;

/// Timeline and capacity facts read off a snapshot at a given instant. The
/// precedence between them lives in `policy::decide`, not here.
pub(crate) struct ScheduleSignals {
    pub ended: bool,
    pub in_progress: bool,
    pub deadline_passed: bool,
    pub full: bool,
    pub spots_remaining: Option<u32>,
}

pub(crate) fn read_signals(snapshot: &EventSnapshot, now: DateTime<Utc>) -> ScheduleSignals {
    // Strict comparison: an event whose effective end equals `now` has not
    // ended yet and falls through to the in-progress check.
    let ended = snapshot
        .effective_end()
        .map(|end| end < now)
        .unwrap_or(false);

    let in_progress = match snapshot.event_date {
        Some(start) => {
            let end = snapshot.end_date.unwrap_or(start);
            start <= now && now <= end
        }
        None => false,
    };

    let deadline_passed = snapshot
        .registration_deadline
        .map(|deadline| deadline < now)
        .unwrap_or(false);

    let (full, spots_remaining) = match snapshot.max_participants {
        Some(max) => (
            snapshot.current_participants >= max,
            Some(max.saturating_sub(snapshot.current_participants)),
        ),
        None => (false, None),
    };

    ScheduleSignals {
        ended,
        in_progress,
        deadline_passed,
        full,
        spots_remaining,
    }
}
