use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::features::dashboard::models::DashboardData;
use crate::features::reports::models::Report;
use crate::features::reports::stats::{new_this_month, resolved_this_week};
use crate::shared::constants::NOT_AVAILABLE;

/// Headline numbers for the three admin stat cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCards {
    pub total: u64,
    pub resolved: u64,
    pub pending: u64,
    pub new_this_month: u64,
    pub resolved_this_week: u64,
    /// Days to one decimal, or `N/A`
    pub avg_resolution: String,
    pub satisfaction: String,
}

impl StatCards {
    pub fn from_analytics(data: &DashboardData) -> Self {
        let total = data.report_count.unwrap_or(0);
        let resolved = data.resolved_count.unwrap_or(0);
        // A zero pending count from the backend is treated as missing
        let pending = match data.pending_count {
            Some(p) if p > 0 => p,
            _ => total.saturating_sub(resolved),
        };

        Self {
            total,
            resolved,
            pending,
            new_this_month: data.new_reports_this_month.unwrap_or(0),
            resolved_this_week: data.resolved_this_week.unwrap_or(0),
            avg_resolution: one_decimal_or_na(data.avg_resolution_time),
            satisfaction: one_decimal_or_na(data.satisfaction_rating),
        }
    }

    /// Recompute the period counts from the loaded records, bucketed in
    /// `now`'s zone.
    pub fn with_period_counts<Tz: TimeZone>(
        mut self,
        records: &[Report],
        now: &DateTime<Tz>,
    ) -> Self {
        self.new_this_month = new_this_month(records, now) as u64;
        self.resolved_this_week = resolved_this_week(records, now) as u64;
        self
    }

    pub fn avg_resolution_caption(&self) -> String {
        format!("Avg. Resolve: {} days", self.avg_resolution)
    }
}

fn one_decimal_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Series handed to the chart widgets as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub category_labels: Vec<String>,
    pub category_counts: Vec<u64>,
    pub avg_resolution_time: Vec<f64>,
    pub new_complaints: Vec<f64>,
}

impl From<&DashboardData> for ChartSeries {
    fn from(data: &DashboardData) -> Self {
        let (category_labels, category_counts) = data
            .reports_by_category
            .iter()
            .flatten()
            .map(|c| (c.name.clone(), c.count))
            .unzip();

        let (avg_resolution_time, new_complaints) = match &data.reports_by_month {
            Some(m) => (m.avg_resolution_time.clone(), m.new_complaints.clone()),
            None => (Vec::new(), Vec::new()),
        };

        Self {
            category_labels,
            category_counts,
            avg_resolution_time,
            new_complaints,
        }
    }
}
