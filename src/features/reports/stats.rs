use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;

use crate::features::reports::models::{Report, ReportStatus};

/// Status tallies over a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
}

impl ReportStats {
    pub fn from_records(records: &[Report]) -> Self {
        records.iter().fold(
            ReportStats {
                total: records.len(),
                ..Default::default()
            },
            |mut acc, r| {
                match r.status {
                    ReportStatus::Pending => acc.pending += 1,
                    ReportStatus::InProgress => acc.in_progress += 1,
                    ReportStatus::Resolved => acc.resolved += 1,
                    ReportStatus::Rejected => acc.rejected += 1,
                    ReportStatus::Unknown => {}
                }
                acc
            },
        )
    }
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, zone: &Tz) -> DateTime<Tz> {
    let midnight = NaiveDateTime::new(date, NaiveTime::default());
    zone.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| zone.from_utc_datetime(&midnight))
}

/// Midnight on the first day of `now`'s month, in `now`'s zone.
pub fn start_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let today = now.date_naive();
    start_of_day(today.with_day(1).unwrap_or(today), &now.timezone())
}

/// Midnight on the most recent Sunday, in `now`'s zone.
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let back = now.weekday().num_days_from_sunday() as i64;
    start_of_day(now.date_naive() - Duration::days(back), &now.timezone())
}

/// Records created since the start of the current month. Records without
/// a creation time are not counted.
pub fn new_this_month<Tz: TimeZone>(records: &[Report], now: &DateTime<Tz>) -> usize {
    let since = start_of_month(now);
    records
        .iter()
        .filter(|r| r.created_at.is_some_and(|at| at >= since))
        .count()
}

/// Resolved records last updated since the start of the current week.
pub fn resolved_this_week<Tz: TimeZone>(records: &[Report], now: &DateTime<Tz>) -> usize {
    let since = start_of_week(now);
    records
        .iter()
        .filter(|r| {
            r.status == ReportStatus::Resolved && r.updated_at.is_some_and(|at| at >= since)
        })
        .count()
}

/// Most recently updated records, newest first; undated records sort last.
pub fn recent_activity(records: &[Report], limit: usize) -> Vec<&Report> {
    let mut sorted: Vec<&Report> = records.iter().collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}
