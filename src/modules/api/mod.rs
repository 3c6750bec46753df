//! Backend REST collaborators.
//!
//! Each page depends only on the traits it needs, so tests can swap in fakes.

mod client;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::Category;
use crate::features::dashboard::models::DashboardData;
use crate::features::notifications::models::Notification;
use crate::features::reports::models::{ComplaintSubmission, Report, UpdateStatusRequest};
use crate::features::users::User;

#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn get_all_reports(&self) -> Result<Vec<Report>>;

    async fn get_my_reports(&self) -> Result<Vec<Report>>;

    async fn update_report_status(
        &self,
        report_id: &str,
        request: &UpdateStatusRequest,
    ) -> Result<()>;

    /// Returns the id the backend assigned to the new report.
    async fn submit(&self, submission: &ComplaintSubmission) -> Result<String>;
}

#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn get_dashboard_data(&self) -> Result<DashboardData>;
}

#[async_trait]
pub trait CategoriesApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn get_current_user(&self) -> Result<User>;

    async fn logout(&self) -> Result<()>;
}

#[async_trait]
pub trait NotificationsApi: Send + Sync {
    async fn get_my_notifications(&self) -> Result<Vec<Notification>>;

    async fn mark_as_read(&self, notification_id: &str) -> Result<()>;
}
