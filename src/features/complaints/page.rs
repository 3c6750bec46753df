//! Complaint tile pages: the staff list of every complaint and the
//! citizen's own complaints.

use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::{Notifier, SessionGuard};
use crate::features::auth::validator::TokenStatus;
use crate::features::dashboard::modal::{map_url, Modal, ReportDetail, StatusEditor};
use crate::features::reports::controller::ReportListController;
use crate::features::reports::filter::SearchScope;
use crate::features::reports::models::{ReportStatus, UpdateStatusRequest};
use crate::features::reports::renderer::{HtmlRenderer, ReportRenderer};
use crate::features::reports::stats::ReportStats;
use crate::features::users::ProfileHeader;
use crate::modules::api::{AuthApi, ReportsApi};

pub const ADMIN_LOAD_ERROR: &str = "Could not fetch complaints.";
pub const CITIZEN_LOAD_ERROR: &str = "Failed to load complaints. Please try again.";
pub const ADMIN_EMPTY_MESSAGE: &str = "No complaints found matching the criteria.";
pub const CITIZEN_EMPTY_MESSAGE: &str =
    "You haven't filed any complaints yet, or none match your filter.";

/// Which complaints the page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Every complaint; admin roles only
    All,
    /// The signed-in citizen's complaints
    Mine,
}

impl ReportScope {
    fn load_error(&self) -> &'static str {
        match self {
            ReportScope::All => ADMIN_LOAD_ERROR,
            ReportScope::Mine => CITIZEN_LOAD_ERROR,
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            ReportScope::All => ADMIN_EMPTY_MESSAGE,
            ReportScope::Mine => CITIZEN_EMPTY_MESSAGE,
        }
    }

    fn search_scope(&self) -> SearchScope {
        match self {
            ReportScope::All => SearchScope::Staff,
            ReportScope::Mine => SearchScope::Citizen,
        }
    }

    /// Tile renderer for this scope; only staff get the status action.
    pub fn renderer(&self) -> HtmlRenderer {
        HtmlRenderer::tiles(*self == ReportScope::All)
    }
}

pub struct ComplaintsPage<R: ReportRenderer> {
    scope: ReportScope,
    guard: Arc<SessionGuard>,
    auth: Arc<dyn AuthApi>,
    reports: Arc<dyn ReportsApi>,
    notifier: Arc<dyn Notifier>,
    list: ReportListController<R>,
    profile: ProfileHeader,
    modal: Modal,
    expanded: Option<String>,
}

impl<R: ReportRenderer> ComplaintsPage<R> {
    pub fn new(
        scope: ReportScope,
        guard: Arc<SessionGuard>,
        auth: Arc<dyn AuthApi>,
        reports: Arc<dyn ReportsApi>,
        notifier: Arc<dyn Notifier>,
        renderer: R,
    ) -> Self {
        // Tiles are a single unbounded page
        let list = ReportListController::new(renderer, 0, scope.empty_message())
            .with_search_scope(scope.search_scope());
        let store = list.store();
        guard.on_logout(move || store.clear());
        Self {
            scope,
            guard,
            auth,
            reports,
            notifier,
            list,
            profile: ProfileHeader::guest(),
            modal: Modal::Closed,
            expanded: None,
        }
    }

    /// Check the session and role, then load the list.
    pub async fn initialize(&mut self) -> Result<()> {
        self.guard.ensure_valid()?;

        let user = self.auth.get_current_user().await;
        if self.scope == ReportScope::All {
            match &user {
                Ok(u) => self.guard.require_admin(u)?,
                Err(e) => {
                    tracing::error!("Could not verify admin role: {}", e);
                    self.guard.navigate_to_login();
                    return Err(AppError::Unauthorized("Admin access required".to_string()));
                }
            }
        }

        self.profile = ProfileHeader::from_result(user);
        self.load().await
    }

    /// Fetch the scope's complaints, showing the loading and error banners.
    pub async fn load(&mut self) -> Result<()> {
        self.list.show_loading()?;

        let fetched = match self.scope {
            ReportScope::All => self.reports.get_all_reports().await,
            ReportScope::Mine => self.reports.get_my_reports().await,
        };

        match fetched {
            Ok(records) => self.list.replace_records(records),
            Err(e) => {
                tracing::error!("Failed to load complaints: {}", e);
                self.list.show_error(self.scope.load_error())?;
                Err(e)
            }
        }
    }

    pub fn scope(&self) -> ReportScope {
        self.scope
    }

    pub fn profile(&self) -> &ProfileHeader {
        &self.profile
    }

    pub fn list(&self) -> &ReportListController<R> {
        &self.list
    }

    pub fn stats(&self) -> ReportStats {
        self.list.stats()
    }

    /// Status filter button; `"all"` clears the filter.
    pub fn filter_by_status(&mut self, value: &str) -> Result<()> {
        let status = match value {
            "all" | "" => None,
            other => match ReportStatus::parse(other) {
                Some(s) => Some(s),
                None => {
                    tracing::warn!("Ignoring unknown status filter {:?}", other);
                    None
                }
            },
        };
        self.list.set_status_filter(status)
    }

    pub fn search(&mut self, text: &str) -> Result<()> {
        self.list.set_search_text(text)
    }

    /// Expand a tile's details, collapsing any other. Returns whether it is now open.
    pub fn toggle_details(&mut self, report_id: &str) -> Result<bool> {
        self.list.find(report_id)?;
        if self.expanded.as_deref() == Some(report_id) {
            self.expanded = None;
            Ok(false)
        } else {
            self.expanded = Some(report_id.to_string());
            Ok(true)
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Map link for a complaint's pin, if it has coordinates.
    pub fn map_link(&self, report_id: &str) -> Result<Option<String>> {
        let report = self.list.find(report_id)?;
        Ok(report.coordinates().map(|(lat, lng)| map_url(lat, lng)))
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn open_detail(&mut self, report_id: &str) -> Result<&ReportDetail> {
        let detail = ReportDetail::from_report(&self.list.find(report_id)?);
        self.modal = Modal::Detail(detail);
        match &self.modal {
            Modal::Detail(detail) => Ok(detail),
            _ => Err(AppError::NotFound(report_id.to_string())),
        }
    }

    pub fn open_status_editor(&mut self, report_id: &str) -> Result<&StatusEditor> {
        self.require_staff_scope()?;
        let editor = StatusEditor::for_report(&self.list.find(report_id)?);
        self.modal = Modal::StatusEditor(editor);
        match &self.modal {
            Modal::StatusEditor(editor) => Ok(editor),
            _ => Err(AppError::NotFound(report_id.to_string())),
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    pub async fn update_status(
        &mut self,
        report_id: &str,
        new_status: ReportStatus,
        remarks: Option<&str>,
    ) -> Result<()> {
        self.require_staff_scope()?;
        self.list.find(report_id)?;

        let request = UpdateStatusRequest {
            new_status,
            remarks: remarks.unwrap_or_default().to_string(),
        };

        if let Err(e) = self.reports.update_report_status(report_id, &request).await {
            tracing::error!("Error updating status for {}: {}", report_id, e);
            self.notifier
                .alert(&format!("Error updating status: {}", e.user_message()));
            return Err(e);
        }

        self.close_modal();
        self.load().await
    }

    /// Periodic session check; an ended session resets the page.
    pub fn check_session(&mut self) -> TokenStatus {
        let status = self.guard.check();
        if !status.is_valid() {
            self.clear_cached();
        }
        status
    }

    pub fn logout(&mut self) {
        self.clear_cached();
        self.guard.logout();
    }

    fn clear_cached(&mut self) {
        self.list.clear_records();
        self.modal = Modal::Closed;
        self.expanded = None;
    }

    fn require_staff_scope(&self) -> Result<()> {
        match self.scope {
            ReportScope::All => Ok(()),
            ReportScope::Mine => Err(AppError::Unauthorized(
                "Citizens cannot change complaint status".to_string(),
            )),
        }
    }
}
