//! Admin dashboard page controller.

use std::sync::Arc;

use chrono::Utc;

use crate::core::config::DashboardConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::guards::{Notifier, SessionGuard};
use crate::features::auth::validator::TokenStatus;
use crate::features::dashboard::activity::{build_activity, render_activity, ActivityItem};
use crate::features::dashboard::cards::{ChartSeries, StatCards};
use crate::features::dashboard::models::DashboardData;
use crate::features::dashboard::modal::{Modal, ReportDetail, StatusEditor};
use crate::features::reports::controller::ReportListController;
use crate::features::reports::models::{ReportStatus, UpdateStatusRequest};
use crate::features::reports::renderer::{ReportRenderer, TABLE_EMPTY_MESSAGE};
use crate::modules::api::{AnalyticsApi, ReportsApi};
use crate::shared::format::to_display_zone;

pub struct AdminDashboard<R: ReportRenderer> {
    guard: Arc<SessionGuard>,
    analytics: Arc<dyn AnalyticsApi>,
    reports: Arc<dyn ReportsApi>,
    notifier: Arc<dyn Notifier>,
    config: DashboardConfig,
    list: ReportListController<R>,
    analytics_data: Option<DashboardData>,
    cards: Option<StatCards>,
    charts: ChartSeries,
    activity: Vec<ActivityItem>,
    activity_html: String,
    modal: Modal,
}

impl<R: ReportRenderer> AdminDashboard<R> {
    pub fn new(
        guard: Arc<SessionGuard>,
        analytics: Arc<dyn AnalyticsApi>,
        reports: Arc<dyn ReportsApi>,
        notifier: Arc<dyn Notifier>,
        config: DashboardConfig,
        renderer: R,
    ) -> Self {
        let list = ReportListController::new(renderer, config.page_size, TABLE_EMPTY_MESSAGE);
        let store = list.store();
        guard.on_logout(move || store.clear());
        Self {
            guard,
            analytics,
            reports,
            notifier,
            config,
            list,
            analytics_data: None,
            cards: None,
            charts: ChartSeries::default(),
            activity: Vec::new(),
            activity_html: String::new(),
            modal: Modal::Closed,
        }
    }

    /// Check the session, then load analytics and reports together.
    ///
    /// If either fetch fails nothing is replaced and the error is returned.
    pub async fn initialize(&mut self) -> Result<()> {
        self.guard.ensure_valid()?;
        tracing::debug!("Initializing admin dashboard");

        let (data, records) = tokio::try_join!(
            self.analytics.get_dashboard_data(),
            self.reports.get_all_reports()
        )
        .map_err(|e| {
            tracing::error!("Failed to load dashboard data: {}", e);
            e
        })?;

        self.charts = ChartSeries::from(&data);
        self.analytics_data = Some(data);
        self.list.replace_records(records)?;
        self.list.go_to_page(1)?;
        self.refresh_derived()?;

        tracing::info!(
            "Admin dashboard loaded with {} reports",
            self.list.records().len()
        );
        Ok(())
    }

    /// Refetch all reports after a write. Prior data stays on failure.
    pub async fn reload(&mut self) -> Result<()> {
        let records = self.reports.get_all_reports().await.map_err(|e| {
            tracing::error!("Failed to reload reports: {}", e);
            e
        })?;
        self.list.replace_records(records)?;
        self.refresh_derived()
    }

    fn refresh_derived(&mut self) -> Result<()> {
        let records = self.list.records();
        let now = to_display_zone(&Utc::now());

        if let Some(data) = &self.analytics_data {
            self.cards = Some(StatCards::from_analytics(data).with_period_counts(&records, &now));
        }

        self.activity = build_activity(&records, self.config.recent_activity_limit);
        self.activity_html = render_activity(&self.activity)?;
        Ok(())
    }

    pub fn list(&self) -> &ReportListController<R> {
        &self.list
    }

    /// Filter and page changes go straight to the list controller.
    pub fn list_mut(&mut self) -> &mut ReportListController<R> {
        &mut self.list
    }

    pub fn cards(&self) -> Option<&StatCards> {
        self.cards.as_ref()
    }

    pub fn charts(&self) -> &ChartSeries {
        &self.charts
    }

    pub fn activity(&self) -> &[ActivityItem] {
        &self.activity
    }

    pub fn activity_html(&self) -> &str {
        &self.activity_html
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

    /// Send a status change. Success closes the modal and reloads; failure
    /// alerts the user and leaves everything as it was.
    pub async fn update_status(
        &mut self,
        report_id: &str,
        new_status: ReportStatus,
        remarks: Option<&str>,
    ) -> Result<()> {
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

        tracing::info!("Status for {} updated to {}", report_id, new_status);
        self.close_modal();
        self.reload().await
    }

    /// Run the periodic session check. The guard's logout hook has already
    /// emptied the record store; an ended session also drops the views
    /// derived from it.
    pub fn check_session(&mut self) -> TokenStatus {
        let status = self.guard.check();
        if !status.is_valid() {
            self.clear_cached();
        }
        status
    }

    /// Drop cached records and end the session.
    pub fn logout(&mut self) {
        self.clear_cached();
        self.guard.logout();
    }

    fn clear_cached(&mut self) {
        self.list.clear_records();
        self.analytics_data = None;
        self.cards = None;
        self.activity.clear();
        self.activity_html.clear();
        self.modal = Modal::Closed;
    }
}
