//! Report list rendering.
//!
//! Controllers hand a [`ListView`] to a [`ReportRenderer`]; the renderer never
//! reads controller state. Row projection is pure so it can be tested without
//! any presentation layer.

use minijinja::context;
use serde::Serialize;

use crate::core::error::Result;
use crate::features::reports::models::Report;
use crate::features::reports::paginator::PaginationControls;
use crate::shared::constants::{NOT_AVAILABLE, TABLE_ID_PREFIX_LEN, TILE_DESCRIPTION_LIMIT};
use crate::shared::display::DisplayConfig;
use crate::shared::format::{
    format_date, format_date_medium, format_lat_lng, format_local, short_id, truncate_text,
};
use crate::shared::templates::{render_view, COMPLAINT_TILES, ISSUES_TABLE};

pub const TABLE_EMPTY_MESSAGE: &str = "No complaints match the current filters.";

/// Capability interface for anything that can show a report list.
pub trait ReportRenderer {
    /// Replace whatever is currently shown with `view`.
    fn render(&mut self, view: &ListView) -> Result<()>;

    fn clear(&mut self);
}

/// What the list area should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Error(String),
    Empty { message: String },
    Rows {
        rows: Vec<ReportRow>,
        pagination: PaginationControls,
    },
}

impl ListView {
    pub fn action_count(&self) -> usize {
        match self {
            ListView::Rows { rows, .. } => rows.iter().map(|r| r.actions.len()).sum(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowActionKind {
    ViewDetail,
    EditStatus,
}

/// Action affordance bound to one record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub kind: RowActionKind,
    pub report_id: String,
    pub label: &'static str,
}

/// One record projected for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub report_id: String,
    pub short_id: String,
    pub title: String,
    pub reporter_name: String,
    pub reporter_email: String,
    pub category: String,
    /// `dd/mm/yyyy`
    pub created_date: String,
    /// `16 Oct 2026`
    pub updated_date: String,
    pub status: DisplayConfig,
    pub priority: DisplayConfig,
    pub progress: u8,
    pub description: String,
    pub coordinates: String,
    pub photo_url: Option<String>,
    pub actions: Vec<RowAction>,
}

impl ReportRow {
    pub fn from_report(report: &Report) -> Self {
        let id = report.report_id.clone();
        Self {
            short_id: short_id(&id, TABLE_ID_PREFIX_LEN),
            title: if report.title.is_empty() {
                "Untitled Complaint".to_string()
            } else {
                report.title.clone()
            },
            reporter_name: report.reporter_name().unwrap_or(NOT_AVAILABLE).to_string(),
            reporter_email: report.reporter_email().unwrap_or(NOT_AVAILABLE).to_string(),
            category: report.category_display_name().to_string(),
            created_date: format_local(report.created_at.as_ref(), format_date),
            updated_date: format_local(report.updated_at.as_ref(), format_date_medium),
            status: report.status.display(),
            priority: report.priority.display(),
            progress: report.status.progress_percentage(),
            description: truncate_text(&report.description, TILE_DESCRIPTION_LIMIT),
            coordinates: format_lat_lng(report.location_lat, report.location_lng, Some(4)),
            photo_url: report.photo_url.clone(),
            actions: vec![
                RowAction {
                    kind: RowActionKind::ViewDetail,
                    report_id: id.clone(),
                    label: "View",
                },
                RowAction {
                    kind: RowActionKind::EditStatus,
                    report_id: id.clone(),
                    label: "Update Status",
                },
            ],
            report_id: id,
        }
    }
}

pub fn build_rows(slice: &[&Report]) -> Vec<ReportRow> {
    slice.iter().map(|r| ReportRow::from_report(r)).collect()
}

/// Presentation layout for [`HtmlRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Admin issues table
    Table,
    /// Complaint tiles; the status action is only shown to staff
    Tiles { allow_status_edit: bool },
}

/// Renders list views to an HTML buffer through the view templates.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    layout: Layout,
    html: String,
}

impl HtmlRenderer {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            html: String::new(),
        }
    }

    pub fn table() -> Self {
        Self::new(Layout::Table)
    }

    pub fn tiles(allow_status_edit: bool) -> Self {
        Self::new(Layout::Tiles { allow_status_edit })
    }

    /// Current rendered markup
    pub fn html(&self) -> &str {
        &self.html
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&mut self, view: &ListView) -> Result<()> {
        let (template, allow_status_edit) = match self.layout {
            Layout::Table => (ISSUES_TABLE, true),
            Layout::Tiles { allow_status_edit } => (COMPLAINT_TILES, allow_status_edit),
        };

        let ctx = match view {
            ListView::Loading => context! { state => "loading" },
            ListView::Error(message) => context! { state => "error", message => message },
            ListView::Empty { message } => context! { state => "empty", message => message },
            ListView::Rows { rows, pagination } => context! {
                state => "rows",
                rows => rows,
                pagination => pagination,
                allow_status_edit => allow_status_edit,
            },
        };

        let html = render_view(template, ctx)?;
        // Only swap the buffer once rendering succeeded
        self.html = html;
        Ok(())
    }

    fn clear(&mut self) {
        self.html.clear();
    }
}
