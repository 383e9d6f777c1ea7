use super::common::*;
use crate::events::eligibility::{DisplayTier, ReasonKey};
use chrono::Duration;

#[test]
fn unlimited_capacity_event_is_open() {
    let snapshot = upcoming_snapshot(10);

    let verdict = engine().evaluate(&snapshot, now());

    assert!(verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Open);
    assert_eq!(verdict.reason, ReasonKey::SpotsOpen);
    assert_eq!(verdict.spots_remaining, None);
}

#[test]
fn nearly_full_event_warns_with_spots_remaining() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(100);
    snapshot.current_participants = 97;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Filling);
    assert_eq!(verdict.reason, ReasonKey::LowAvailability);
    assert_eq!(verdict.spots_remaining, Some(3));
}

#[test]
fn event_at_capacity_is_full() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(50);
    snapshot.current_participants = 50;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Full);
    assert_eq!(verdict.reason, ReasonKey::CapacityReached);
}

#[test]
fn overbooked_event_is_still_full_not_an_error() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(50);
    snapshot.current_participants = 57;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Full);
}

#[test]
fn finished_event_is_ended() {
    let mut snapshot = upcoming_snapshot(-1);
    snapshot.end_date = snapshot.event_date;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Ended);
    assert_eq!(verdict.reason, ReasonKey::EventEnded);
}

#[test]
fn end_date_falls_back_to_event_date() {
    let snapshot = upcoming_snapshot(-1);
    assert!(snapshot.end_date.is_none());

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::Ended);
}

#[test]
fn running_event_is_in_progress() {
    let mut snapshot = upcoming_snapshot(0);
    snapshot.event_date = Some(now());
    snapshot.end_date = Some(now() + Duration::hours(2));

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::InProgress);
    assert_eq!(verdict.reason, ReasonKey::EventInProgress);
}

#[test]
fn zero_duration_event_at_now_is_in_progress_not_ended() {
    let mut snapshot = upcoming_snapshot(0);
    snapshot.event_date = Some(now());
    snapshot.end_date = Some(now());

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::InProgress);
}

#[test]
fn event_ending_exactly_now_is_in_progress() {
    let mut snapshot = upcoming_snapshot(-1);
    snapshot.end_date = Some(now());

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::InProgress);
}

#[test]
fn disabled_registration_closes_an_upcoming_event() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.registration_enabled = false;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Closed);
    assert_eq!(verdict.reason, ReasonKey::RegistrationDisabled);
}

#[test]
fn past_deadline_closes_despite_available_capacity() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.registration_deadline = Some(now() - Duration::days(1));
    snapshot.max_participants = Some(100);
    snapshot.current_participants = 5;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Closed);
    assert_eq!(verdict.reason, ReasonKey::DeadlinePassed);
}

#[test]
fn deadline_exactly_now_still_accepts() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.registration_deadline = Some(now());

    let verdict = engine().evaluate(&snapshot, now());

    assert!(verdict.can_register);
}

#[test]
fn unpublished_wins_over_every_other_rule() {
    let mut snapshot = upcoming_snapshot(-1);
    snapshot.published = false;
    snapshot.registration_enabled = false;
    snapshot.registration_deadline = Some(now() - Duration::days(5));
    snapshot.max_participants = Some(10);
    snapshot.current_participants = 10;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(!verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Unpublished);
    assert_eq!(verdict.reason, ReasonKey::NotPublished);
}

#[test]
fn ended_wins_over_disabled_registration() {
    let mut snapshot = upcoming_snapshot(-2);
    snapshot.registration_enabled = false;

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::Ended);
}

#[test]
fn in_progress_wins_over_disabled_registration() {
    let mut snapshot = upcoming_snapshot(0);
    snapshot.event_date = Some(now() - Duration::hours(1));
    snapshot.end_date = Some(now() + Duration::hours(1));
    snapshot.registration_enabled = false;

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::InProgress);
}

#[test]
fn disabled_registration_wins_over_passed_deadline() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.registration_enabled = false;
    snapshot.registration_deadline = Some(now() - Duration::days(1));

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.reason, ReasonKey::RegistrationDisabled);
}

#[test]
fn passed_deadline_wins_over_full_capacity() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.registration_deadline = Some(now() - Duration::days(1));
    snapshot.max_participants = Some(20);
    snapshot.current_participants = 20;

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.reason, ReasonKey::DeadlinePassed);
    assert_eq!(verdict.tier, DisplayTier::Closed);
}

#[test]
fn missing_event_date_skips_timeline_rules() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.event_date = None;
    snapshot.end_date = None;

    let verdict = engine().evaluate(&snapshot, now());

    assert!(verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Open);
}

#[test]
fn past_end_date_applies_even_without_event_date() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.event_date = None;
    snapshot.end_date = Some(now() - Duration::days(3));

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::Ended);
}

#[test]
fn small_share_of_large_capacity_is_filling() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(1000);
    snapshot.current_participants = 940;

    let verdict = engine().evaluate(&snapshot, now());

    // 60 spots clear the floor but sit below 10% of capacity.
    assert!(verdict.can_register);
    assert_eq!(verdict.tier, DisplayTier::Filling);
    assert_eq!(verdict.spots_remaining, Some(60));
}

#[test]
fn exactly_ten_percent_remaining_is_still_open() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(100);
    snapshot.current_participants = 90;

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::Open);
    assert_eq!(verdict.spots_remaining, Some(10));
}

#[test]
fn spot_floor_boundary_is_filling() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(200);
    snapshot.current_participants = 195;

    let verdict = engine().evaluate(&snapshot, now());

    assert_eq!(verdict.tier, DisplayTier::Filling);
    assert_eq!(verdict.spots_remaining, Some(5));
}

#[test]
fn evaluation_is_deterministic() {
    let mut snapshot = upcoming_snapshot(7);
    snapshot.max_participants = Some(30);
    snapshot.current_participants = 28;

    let first = engine().evaluate(&snapshot, now());
    let second = engine().evaluate(&snapshot, now());

    assert_eq!(first, second);
}

#[test]
fn filling_participants_flips_registrability_exactly_once() {
    let mut snapshot = upcoming_snapshot(10);
    snapshot.max_participants = Some(50);
    let evaluator = engine();

    let mut transitions = 0;
    let mut previous = true;
    for current in 0..=60 {
        snapshot.current_participants = current;
        let registrable = evaluator.evaluate(&snapshot, now()).can_register;
        if registrable != previous {
            transitions += 1;
        }
        previous = registrable;
    }

    assert_eq!(transitions, 1, "one flip from registrable to full, no recovery");
    assert!(!previous);
}
