//! Detail and status-update modals.

use minijinja::context;
use serde::Serialize;

use crate::core::error::Result;
use crate::features::reports::models::{Report, ReportStatus};
use crate::shared::constants::{MAP_SEARCH_URL, NOT_AVAILABLE, PLACEHOLDER_IMAGE_URL};
use crate::shared::display::DisplayConfig;
use crate::shared::format::{capitalize_or_na, format_date_time, format_lat_lng, format_local};
use crate::shared::templates::{render_view, DETAIL_MODAL};

/// Everything the detail modal shows for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDetail {
    pub report_id: String,
    pub title: String,
    pub reporter_name: String,
    pub reporter_email: String,
    pub submitted_at: String,
    pub description: String,
    pub image_url: String,
    pub status: DisplayConfig,
    pub priority: DisplayConfig,
    pub department: String,
    pub audio_url: Option<String>,
    pub location: String,
    /// Only set when both coordinates are known
    pub map_url: Option<String>,
}

impl ReportDetail {
    pub fn from_report(report: &Report) -> Self {
        Self {
            report_id: report.report_id.clone(),
            title: report.title.clone(),
            reporter_name: report.reporter_name().unwrap_or(NOT_AVAILABLE).to_string(),
            reporter_email: report.reporter_email().unwrap_or(NOT_AVAILABLE).to_string(),
            submitted_at: format_local(report.created_at.as_ref(), format_date_time),
            description: report.description.clone(),
            image_url: report
                .photo_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            status: report.status.display(),
            priority: report.priority.display(),
            department: capitalize_or_na(report.category_name()),
            audio_url: report.voice_recording_url.clone().filter(|url| !url.is_empty()),
            location: format_lat_lng(report.location_lat, report.location_lng, None),
            map_url: report.coordinates().map(|(lat, lng)| map_url(lat, lng)),
        }
    }

    pub fn render(&self) -> Result<String> {
        render_view(DETAIL_MODAL, context! { detail => self })
    }
}

pub fn map_url(lat: f64, lng: f64) -> String {
    format!("{}?q={},{}", MAP_SEARCH_URL, lat, lng)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusOption {
    pub status: ReportStatus,
    pub label: &'static str,
    pub selected: bool,
}

/// Status-update form for one report, preselected on its current status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEditor {
    pub report_id: String,
    pub title: String,
    pub options: Vec<StatusOption>,
}

impl StatusEditor {
    pub fn for_report(report: &Report) -> Self {
        Self {
            report_id: report.report_id.clone(),
            title: report.title.clone(),
            options: ReportStatus::ASSIGNABLE
                .into_iter()
                .map(|status| StatusOption {
                    status,
                    label: status.display().label,
                    selected: status == report.status,
                })
                .collect(),
        }
    }

    pub fn selected(&self) -> Option<ReportStatus> {
        self.options.iter().find(|o| o.selected).map(|o| o.status)
    }
}

/// Which modal, if any, is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Detail(ReportDetail),
    StatusEditor(StatusEditor),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }
}
