//! Text and date formatting shared by the renderers.

use std::fmt::Display;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

use crate::shared::constants::NOT_AVAILABLE;

static DISPLAY_ZONE: OnceLock<FixedOffset> = OnceLock::new();

/// Pin the offset dates are shown in. Only the first call takes effect.
pub fn set_display_zone(offset: FixedOffset) {
    if DISPLAY_ZONE.set(offset).is_err() {
        tracing::warn!("Display zone already set, ignoring {}", offset);
    }
}

/// Offset used to show dates and to bucket them into days, weeks and
/// months. Defaults to the machine's local offset.
pub fn display_zone() -> FixedOffset {
    DISPLAY_ZONE
        .get()
        .copied()
        .unwrap_or_else(|| Local::now().offset().fix())
}

pub fn to_display_zone(value: &DateTime<Utc>) -> DateTime<FixedOffset> {
    value.with_timezone(&display_zone())
}

/// Render an optional timestamp in the display zone, `N/A` when absent.
pub fn format_local(
    value: Option<&DateTime<Utc>>,
    format: fn(&DateTime<FixedOffset>) -> String,
) -> String {
    match value {
        Some(v) => format(&to_display_zone(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize an optional value, using `N/A` when absent or empty.
pub fn capitalize_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => capitalize(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Truncate to `limit` characters with a trailing ellipsis.
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.is_empty() {
        return "No description provided.".to_string();
    }
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// First `len` characters of an identifier.
pub fn short_id(id: &str, len: usize) -> String {
    id.chars().take(len).collect()
}

/// `16/10/2026`
pub fn format_date<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%d/%m/%Y").to_string()
}

/// `16 Oct 2026`
pub fn format_date_medium<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%-d %b %Y").to_string()
}

/// `16/10/2026, 2:05:09 pm`
pub fn format_date_time<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%d/%m/%Y, %-I:%M:%S %P").to_string()
}

/// `Friday, 16 October 2026`
pub fn format_long_date<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    value.format("%A, %-d %B %Y").to_string()
}

/// Relative age such as "3 days ago".
pub fn format_time_ago(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *then).num_seconds().max(0) as f64;

    const STEPS: [(f64, &str); 5] = [
        (31_536_000.0, "years"),
        (2_592_000.0, "months"),
        (86_400.0, "days"),
        (3_600.0, "hours"),
        (60.0, "minutes"),
    ];

    for (unit, label) in STEPS {
        let interval = seconds / unit;
        if interval > 1.0 {
            return format!("{} {} ago", interval.floor() as i64, label);
        }
    }

    format!("{} seconds ago", seconds.floor() as i64)
}

/// `Lat: x, Lng: y` as shown on tiles and in the detail modal.
pub fn format_lat_lng(lat: Option<f64>, lng: Option<f64>, decimals: Option<usize>) -> String {
    let part = |v: Option<f64>| match (v, decimals) {
        (Some(v), Some(d)) => format!("{:.*}", d, v),
        (Some(v), None) => v.to_string(),
        (None, _) => NOT_AVAILABLE.to_string(),
    };
    format!("Lat: {}, Lng: {}", part(lat), part(lng))
}
