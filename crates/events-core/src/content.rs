//! Pure formatting helpers shared by intake and the CLI renderers.

use chrono::{DateTime, Utc};

/// Strip markup from backend-provided rich text so summaries render as plain
/// text. Tags are dropped, the handful of entities the content editor emits
/// are decoded, and runs of whitespace collapse to single spaces.
pub fn strip_html(input: &str) -> String {
    let mut text = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                if in_tag {
                    in_tag = false;
                    text.push(' ');
                } else {
                    text.push('>');
                }
            }
            _ if in_tag => {}
            _ => text.push(ch),
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite a Google Drive share link into a direct image URL. Anything that
/// is not a recognizable Drive link passes through unchanged.
pub fn drive_image_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.contains("drive.google.com") {
        return trimmed.to_string();
    }

    let file_id = trimmed
        .split_once("/file/d/")
        .map(|(_, rest)| rest)
        .and_then(|rest| rest.split(['/', '?']).next())
        .or_else(|| {
            trimmed
                .split_once("id=")
                .map(|(_, rest)| rest)
                .and_then(|rest| rest.split('&').next())
        })
        .filter(|id| !id.is_empty());

    match file_id {
        Some(id) => format!("https://drive.google.com/uc?export=view&id={id}"),
        None => trimmed.to_string(),
    }
}

/// Fixed English rendering for CLI output. Client locales are handled by the
/// clients themselves.
pub fn format_event_date(date: DateTime<Utc>) -> String {
    date.format("%d %b %Y %H:%M UTC").to_string()
}
