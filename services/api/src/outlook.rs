use crate::infra::parse_instant;
use chrono::{DateTime, Utc};
use clap::Args;
use events_core::config::AppConfig;
use events_core::content::format_event_date;
use events_core::error::AppError;
use events_core::events::{
    registration_outlook, EligibilityEngine, EventCsvImporter, EventRecord,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct OutlookArgs {
    /// Events CSV export to evaluate
    #[arg(long)]
    csv: PathBuf,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    today: Option<DateTime<Utc>>,
    /// Include a per-event listing in the output
    #[arg(long)]
    list_events: bool,
}

pub(crate) fn run_events_outlook(args: OutlookArgs) -> Result<(), AppError> {
    let OutlookArgs {
        csv,
        today,
        list_events,
    } = args;

    let config = AppConfig::load()?;
    let engine = EligibilityEngine::new(config.registration);
    let records = EventCsvImporter::from_path(csv)?;
    let now = today.unwrap_or_else(Utc::now);

    let outlook = registration_outlook(&records, &engine, now);

    println!("Registration outlook");
    println!(
        "Evaluated {} across {} event(s)",
        format_event_date(now),
        outlook.total_events
    );
    println!(
        "Open for registration: {}",
        outlook.open_for_registration
    );

    println!("\nEvents by tier");
    for entry in &outlook.tier_counts {
        println!("- {}: {}", entry.tier, entry.count);
    }

    if outlook.low_availability.is_empty() {
        println!("\nLow availability: none");
    } else {
        println!("\nLow availability");
        for entry in &outlook.low_availability {
            println!(
                "- {} ({}): {} spot(s) left",
                entry.title, entry.event_id.0, entry.spots_remaining
            );
        }
    }

    if list_events {
        println!("\nEvent breakdown");
        for record in &records {
            render_event_line(record, &engine, now);
        }
    }

    Ok(())
}

fn render_event_line(record: &EventRecord, engine: &EligibilityEngine, now: DateTime<Utc>) {
    let verdict = engine.evaluate(&record.snapshot, now);
    let start = match record.snapshot.event_date {
        Some(date) => format_event_date(date),
        None => "date unknown".to_string(),
    };
    let spots_note = match verdict.spots_remaining {
        Some(spots) => format!(" ({spots} spot(s) left)"),
        None => String::new(),
    };
    let summary_note = match &record.summary {
        Some(summary) => format!(" | {summary}"),
        None => String::new(),
    };

    println!(
        "- {} | {} | {} | {}{}{}",
        record.id.0,
        record.title,
        start,
        verdict.tier.label(),
        spots_note,
        summary_note
    );
}
