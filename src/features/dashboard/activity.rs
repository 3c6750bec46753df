use minijinja::context;
use serde::Serialize;

use crate::core::error::Result;
use crate::features::reports::models::Report;
use crate::features::reports::stats::recent_activity;
use crate::shared::constants::ACTIVITY_ID_PREFIX_LEN;
use crate::shared::display::DisplayConfig;
use crate::shared::format::{format_date_time, format_local, short_id};
use crate::shared::templates::{render_view, RECENT_ACTIVITY};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub report_id: String,
    pub short_id: String,
    pub title: String,
    pub status: DisplayConfig,
    pub updated_date: String,
}

impl ActivityItem {
    pub fn from_report(report: &Report) -> Self {
        Self {
            report_id: report.report_id.clone(),
            short_id: short_id(&report.report_id, ACTIVITY_ID_PREFIX_LEN),
            title: report.title.clone(),
            status: report.status.display(),
            updated_date: format_local(report.updated_at.as_ref(), format_date_time),
        }
    }
}

/// Latest `limit` updates, newest first.
pub fn build_activity(records: &[Report], limit: usize) -> Vec<ActivityItem> {
    recent_activity(records, limit)
        .into_iter()
        .map(ActivityItem::from_report)
        .collect()
}

pub fn render_activity(items: &[ActivityItem]) -> Result<String> {
    render_view(RECENT_ACTIVITY, context! { items => items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::report_at;
    use chrono::{Duration, Utc};

    #[test]
    fn test_activity_items() {
        let now = Utc::now();
        let records = vec![
            report_at("aaaaaaaa-1111", now - Duration::days(3), now - Duration::days(2)),
            report_at("bbbbbbbb-2222", now - Duration::days(9), now),
            report_at("cccccccc-3333", now - Duration::days(1), now - Duration::days(1)),
            report_at("dddddddd-4444", now - Duration::days(1), now - Duration::days(5)),
        ];

        let items = build_activity(&records, 3);
        let ids: Vec<&str> = items.iter().map(|i| i.short_id.as_str()).collect();
        assert_eq!(ids, vec!["bbbbbbbb", "cccccccc", "aaaaaaaa"]);

        let html = render_activity(&items).unwrap();
        assert!(html.contains("#bbbbbbbb"));
        assert!(!html.contains("dddddddd"));
    }

    #[test]
    fn test_empty_activity() {
        let html = render_activity(&[]).unwrap();
        assert!(html.contains("No recent activity."));
    }
}
