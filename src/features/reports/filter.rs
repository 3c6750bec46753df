//! Filter engine: (records, criteria) -> ordered subsequence.

use crate::features::reports::models::{Report, ReportPriority, ReportStatus};

/// Which record fields the free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Staff lists: title, id, reporter name, reporter email
    #[default]
    Staff,
    /// Citizen list: title, description, id, category name
    Citizen,
}

/// Active filter selection. `None` and an empty search impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub priority: Option<ReportPriority>,
    pub search_text: String,
    pub search_scope: SearchScope,
}

impl FilterCriteria {
    pub fn with_scope(scope: SearchScope) -> Self {
        Self {
            search_scope: scope,
            ..Self::default()
        }
    }

    /// Build criteria from raw control values where `"all"` means unconstrained.
    pub fn from_params(status: &str, category: &str, priority: &str, search_text: &str) -> Self {
        Self {
            status: parse_selection(status, ReportStatus::parse, "status"),
            category: match category.trim() {
                "" | "all" => None,
                other => Some(other.to_string()),
            },
            priority: parse_selection(priority, ReportPriority::parse, "priority"),
            search_text: search_text.to_string(),
            search_scope: SearchScope::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.search_text.trim().is_empty()
    }

    /// True when the record satisfies every active criterion.
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(status) = self.status {
            if report.status != status {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if report.category_name() != Some(category.as_str()) {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if report.priority != priority {
                return false;
            }
        }

        let needle = self.search_text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let contains = |field: Option<&str>| {
            field
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        match self.search_scope {
            SearchScope::Staff => {
                contains(Some(&report.title))
                    || contains(Some(&report.report_id))
                    || contains(report.reporter_name())
                    || contains(report.reporter_email())
            }
            SearchScope::Citizen => {
                contains(Some(&report.title))
                    || contains(Some(&report.description))
                    || contains(Some(&report.report_id))
                    || contains(Some(report.category_display_name()))
            }
        }
    }
}

fn parse_selection<T>(value: &str, parse: fn(&str) -> Option<T>, name: &str) -> Option<T> {
    match value.trim() {
        "" | "all" => None,
        other => {
            let parsed = parse(other);
            if parsed.is_none() {
                tracing::warn!("Ignoring unrecognised {} filter value: {}", name, other);
            }
            parsed
        }
    }
}

/// Apply the criteria without touching the input; relative order is preserved.
pub fn filter_reports<'a>(records: &'a [Report], criteria: &FilterCriteria) -> Vec<&'a Report> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{report, report_with};

    fn sample() -> Vec<Report> {
        vec![
            report_with("r-1", ReportStatus::Pending, ReportPriority::High, Some("Roads"), Some(("Asha", "asha@example.com"))),
            report_with("r-2", ReportStatus::Resolved, ReportPriority::Low, Some("Water"), Some(("Bilal", "bilal@example.com"))),
            report_with("r-3", ReportStatus::Pending, ReportPriority::Low, Some("Roads"), None),
            report_with("r-4", ReportStatus::InProgress, ReportPriority::High, None, Some(("Chen", "chen@city.gov"))),
            report_with("r-5", ReportStatus::Pending, ReportPriority::Urgent, Some("Water"), Some(("Asha", "asha@example.com"))),
        ]
    }

    fn ids(reports: &[&Report]) -> Vec<String> {
        reports.iter().map(|r| r.report_id.clone()).collect()
    }

    /// `sub` appears in `full` in the same relative order
    fn is_subsequence(sub: &[&Report], full: &[Report]) -> bool {
        let mut it = full.iter();
        sub.iter()
            .all(|s| it.any(|f| f.report_id == s.report_id))
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let records = sample();
        let result = filter_reports(&records, &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["r-1", "r-2", "r-3", "r-4", "r-5"]);
        assert!(FilterCriteria::default().is_empty());
    }

    #[test]
    fn test_status_category_priority_combined() {
        let records = sample();
        let criteria = FilterCriteria::from_params("pending", "Roads", "all", "");
        assert_eq!(ids(&filter_reports(&records, &criteria)), vec!["r-1", "r-3"]);

        let criteria = FilterCriteria::from_params("pending", "all", "low", "");
        assert_eq!(ids(&filter_reports(&records, &criteria)), vec!["r-3"]);
    }

    #[test]
    fn test_every_combination_is_ordered_subsequence() {
        let records = sample();
        let statuses = ["all", "pending", "in_progress", "resolved", "rejected"];
        let categories = ["all", "Roads", "Water", "Parks"];
        let priorities = ["all", "low", "medium", "high", "urgent"];
        let searches = ["", "asha", "R-", "zzz"];

        for s in statuses {
            for c in categories {
                for p in priorities {
                    for q in searches {
                        let criteria = FilterCriteria::from_params(s, c, p, q);
                        let result = filter_reports(&records, &criteria);
                        assert!(is_subsequence(&result, &records), "{s}/{c}/{p}/{q}");
                        assert!(result.iter().all(|r| criteria.matches(r)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_search_is_case_insensitive_across_staff_fields() {
        let records = sample();
        let by_email = FilterCriteria::from_params("all", "all", "all", "CITY.GOV");
        assert_eq!(ids(&filter_reports(&records, &by_email)), vec!["r-4"]);

        let by_name = FilterCriteria::from_params("all", "all", "all", "asha");
        assert_eq!(ids(&filter_reports(&records, &by_name)), vec!["r-1", "r-5"]);

        let by_id = FilterCriteria::from_params("all", "all", "all", "r-2");
        assert_eq!(ids(&filter_reports(&records, &by_id)), vec!["r-2"]);
    }

    #[test]
    fn test_missing_reporter_does_not_match_or_fail() {
        let records = sample();
        // r-3 has no reporter; searching a reporter name must skip it quietly
        let criteria = FilterCriteria::from_params("all", "Roads", "all", "bilal");
        assert!(filter_reports(&records, &criteria).is_empty());
    }

    #[test]
    fn test_citizen_scope_searches_description_and_category() {
        let mut records = sample();
        records[1].description = "Pipe burst flooding the lane".to_string();

        let mut criteria = FilterCriteria::with_scope(SearchScope::Citizen);
        criteria.search_text = "flooding".to_string();
        assert_eq!(ids(&filter_reports(&records, &criteria)), vec!["r-2"]);

        criteria.search_text = "uncategorized".to_string();
        assert_eq!(ids(&filter_reports(&records, &criteria)), vec!["r-4"]);

        // reporter email is not part of the citizen search
        criteria.search_text = "chen@city.gov".to_string();
        assert!(filter_reports(&records, &criteria).is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let records = vec![report("a"), report("b")];
        let before: Vec<String> = records.iter().map(|r| r.report_id.clone()).collect();
        let _ = filter_reports(&records, &FilterCriteria::from_params("resolved", "all", "all", ""));
        let after: Vec<String> = records.iter().map(|r| r.report_id.clone()).collect();
        assert_eq!(before, after);
    }
}
