use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::display::{
    lookup, DisplayConfig, PRIORITY_FALLBACK, PRIORITY_TABLE, STATUS_FALLBACK, STATUS_TABLE,
};

/// Complaint lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
    /// Any value the backend sends that this client does not know
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    /// Statuses a staff member can assign, in menu order
    pub const ASSIGNABLE: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
            ReportStatus::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ASSIGNABLE
            .into_iter()
            .find(|s| s.as_str() == value)
    }

    pub fn display(&self) -> DisplayConfig {
        lookup(STATUS_TABLE, self.as_str(), STATUS_FALLBACK).config
    }

    /// Completion percentage shown on the progress bar
    pub fn progress_percentage(&self) -> u8 {
        lookup(STATUS_TABLE, self.as_str(), STATUS_FALLBACK).progress
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complaint priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
    Urgent,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReportPriority {
    pub const ALL: [ReportPriority; 4] = [
        ReportPriority::Low,
        ReportPriority::Medium,
        ReportPriority::High,
        ReportPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPriority::Low => "low",
            ReportPriority::Medium => "medium",
            ReportPriority::High => "high",
            ReportPriority::Urgent => "urgent",
            ReportPriority::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    pub fn display(&self) -> DisplayConfig {
        lookup(PRIORITY_TABLE, self.as_str(), PRIORITY_FALLBACK).config
    }
}

impl std::fmt::Display for ReportPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category as populated on a report (lookup only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "categoryId", default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Reporter as populated on a report (lookup only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Complaint record as returned by the reports endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "reportId")]
    pub report_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub priority: ReportPriority,
    /// Populated category; a bare id or null decodes as absent
    #[serde(rename = "categoryId", default, deserialize_with = "populated_or_none")]
    pub category: Option<CategoryRef>,
    /// Populated reporter; a bare id or null decodes as absent
    #[serde(rename = "userId", default, deserialize_with = "populated_or_none")]
    pub reporter: Option<ReporterRef>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub voice_recording_url: Option<String>,
    /// Absent or unparseable timestamps decode as `None` and render as `N/A`
    #[serde(rename = "createdAt", default, deserialize_with = "timestamp_or_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, deserialize_with = "timestamp_or_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn reporter_name(&self) -> Option<&str> {
        self.reporter.as_ref().and_then(|r| r.name.as_deref())
    }

    pub fn reporter_email(&self) -> Option<&str> {
        self.reporter.as_ref().and_then(|r| r.email.as_deref())
    }

    /// Category label for citizen tiles
    pub fn category_display_name(&self) -> &str {
        match &self.category {
            None => "Uncategorized",
            Some(c) => c.name.as_deref().unwrap_or("Unknown Category"),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Accept a populated object, treating ids, nulls and other shapes as absent.
pub(crate) fn populated_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_object() {
        Ok(serde_json::from_value(value).ok())
    } else {
        Ok(None)
    }
}

fn timestamp_or_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|at| at.with_timezone(&Utc)))
}

/// Body of the status update call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub new_status: ReportStatus,
    pub remarks: String,
}
