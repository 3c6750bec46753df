use serde::{Deserialize, Serialize};

/// Aggregate analytics for the admin dashboard. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub report_count: Option<u64>,
    pub resolved_count: Option<u64>,
    pub pending_count: Option<u64>,
    pub new_reports_this_month: Option<u64>,
    pub resolved_this_week: Option<u64>,
    /// Days
    pub avg_resolution_time: Option<f64>,
    pub satisfaction_rating: Option<f64>,
    pub reports_by_category: Option<Vec<CategoryCount>>,
    pub reports_by_month: Option<MonthlySeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlySeries {
    pub avg_resolution_time: Vec<f64>,
    pub new_complaints: Vec<f64>,
}
