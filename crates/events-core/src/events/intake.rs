//! Normalization of loosely-typed backend rows into evaluable snapshots.
//!
//! The content backend stores dates as strings and treats most fields as
//! optional, so every conversion here degrades instead of failing: a value
//! that cannot be interpreted becomes "absent" and the matching eligibility
//! rule is simply skipped downstream.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::content::strip_html;

use super::domain::{EventId, EventSnapshot};
use super::repository::EventRecord;

/// Event row as returned by the content backend, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEventRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary_html: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub registration_enabled: Option<bool>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub registration_deadline: Option<String>,
    #[serde(default)]
    pub current_participants: Option<i64>,
    #[serde(default)]
    pub max_participants: Option<i64>,
}

pub fn snapshot_from_raw(raw: &RawEventRecord) -> EventSnapshot {
    EventSnapshot {
        // Only an explicit `false` hides an event; registration is opt-in.
        published: raw.published.unwrap_or(true),
        registration_enabled: raw.registration_enabled.unwrap_or(false),
        event_date: raw.event_date.as_deref().and_then(parse_timestamp),
        end_date: raw.end_date.as_deref().and_then(parse_timestamp),
        registration_deadline: raw
            .registration_deadline
            .as_deref()
            .and_then(parse_timestamp),
        current_participants: raw
            .current_participants
            .map(|count| count.max(0) as u32)
            .unwrap_or(0),
        max_participants: raw
            .max_participants
            .filter(|max| *max > 0)
            .map(|max| max as u32),
    }
}

pub fn record_from_raw(raw: RawEventRecord) -> EventRecord {
    let snapshot = snapshot_from_raw(&raw);
    let summary = raw
        .summary_html
        .as_deref()
        .map(strip_html)
        .filter(|text| !text.is_empty());

    EventRecord {
        id: EventId(raw.id),
        title: raw.title,
        summary,
        snapshot,
        registrations: Vec::new(),
    }
}

/// Lenient timestamp parsing: RFC 3339 first, then a bare `YYYY-MM-DD`
/// (midnight UTC). Anything else is treated as absent.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}
