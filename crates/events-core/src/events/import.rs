//! CSV import of event rows, for operator tooling and the outlook endpoint.
//!
//! The export format mirrors what the content backend's admin dashboard
//! produces: one row per event, empty cells meaning "absent", dates as
//! RFC 3339 or bare `YYYY-MM-DD`. Malformed optional fields degrade the same
//! way intake degrades them; only structurally broken CSV is an error.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::intake::{record_from_raw, RawEventRecord};
use super::repository::EventRecord;

#[derive(Debug, thiserror::Error)]
pub enum EventImportError {
    #[error("failed to read events export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid events CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct EventCsvImporter;

impl EventCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>, EventImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EventRecord>, EventImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<EventRow>() {
            let row = row?;
            records.push(record_from_raw(row.into_raw()));
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(rename = "Event ID")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Summary", default, deserialize_with = "empty_string_as_none")]
    summary: Option<String>,
    #[serde(rename = "Published", default, deserialize_with = "empty_string_as_none")]
    published: Option<String>,
    #[serde(
        rename = "Registration Enabled",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    registration_enabled: Option<String>,
    #[serde(rename = "Event Date", default, deserialize_with = "empty_string_as_none")]
    event_date: Option<String>,
    #[serde(rename = "End Date", default, deserialize_with = "empty_string_as_none")]
    end_date: Option<String>,
    #[serde(
        rename = "Registration Deadline",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    registration_deadline: Option<String>,
    #[serde(
        rename = "Current Participants",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    current_participants: Option<String>,
    #[serde(
        rename = "Max Participants",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    max_participants: Option<String>,
}

impl EventRow {
    fn into_raw(self) -> RawEventRecord {
        RawEventRecord {
            id: self.id,
            title: self.title,
            summary_html: self.summary,
            published: self.published.as_deref().and_then(parse_flag),
            registration_enabled: self.registration_enabled.as_deref().and_then(parse_flag),
            event_date: self.event_date,
            end_date: self.end_date,
            registration_deadline: self.registration_deadline,
            current_participants: self
                .current_participants
                .as_deref()
                .and_then(|value| value.parse::<i64>().ok()),
            max_participants: self
                .max_participants
                .as_deref()
                .and_then(|value| value.parse::<i64>().ok()),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
