//! Fixtures and in-memory fakes for unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::{Navigator, Notifier};
use crate::features::auth::store::SessionStore;
use crate::features::categories::Category;
use crate::features::dashboard::models::DashboardData;
use crate::features::notifications::models::{
    Notification, NotificationReportRef, NotificationStatus, NotificationType,
};
use crate::features::notifications::renderer::{NotificationRenderer, NotificationView};
use crate::features::reports::models::{
    CategoryRef, ComplaintSubmission, Report, ReportPriority, ReportStatus, ReporterRef,
    UpdateStatusRequest,
};
use crate::features::reports::renderer::{ListView, ReportRenderer};
use crate::features::users::User;
use crate::modules::api::{AnalyticsApi, AuthApi, CategoriesApi, NotificationsApi, ReportsApi};
use crate::modules::geocoding::{GeocodedLocation, Geocoder, ADDRESS_NOT_FOUND};

// =============================================================================
// FIXTURES
// =============================================================================

pub fn report(id: &str) -> Report {
    let now = Utc::now();
    Report {
        report_id: id.to_string(),
        title: Sentence(2..5).fake(),
        description: Paragraph(1..2).fake(),
        status: ReportStatus::Pending,
        priority: ReportPriority::Medium,
        category: None,
        reporter: None,
        location_lat: None,
        location_lng: None,
        photo_url: None,
        voice_recording_url: None,
        created_at: Some(now),
        updated_at: Some(now),
    }
}

pub fn report_with(
    id: &str,
    status: ReportStatus,
    priority: ReportPriority,
    category: Option<&str>,
    reporter: Option<(&str, &str)>,
) -> Report {
    Report {
        status,
        priority,
        category: category.map(|name| CategoryRef {
            category_id: Some(format!("cat-{}", name.to_lowercase())),
            name: Some(name.to_string()),
        }),
        reporter: reporter.map(|(name, email)| ReporterRef {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }),
        ..report(id)
    }
}

pub fn report_at(id: &str, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Report {
    Report {
        created_at: Some(created_at),
        updated_at: Some(updated_at),
        ..report(id)
    }
}

pub fn notification(id: &str, status: NotificationStatus) -> Notification {
    Notification {
        notification_id: id.to_string(),
        message: Sentence(3..6).fake(),
        notification_type: NotificationType::StatusUpdate,
        status,
        report: Some(NotificationReportRef {
            title: Some(Sentence(2..4).fake()),
        }),
        created_at: Utc::now(),
    }
}

pub fn user_with_role(role: &str) -> User {
    User {
        user_id: Some("u-test".to_string()),
        name: Some("Test User".to_string()),
        username: None,
        email: Some("test@example.com".to_string()),
        role: Some(role.to_string()),
    }
}

/// Unsigned JWT with an optional `exp` claim.
pub fn jwt_with_exp(exp: Option<i64>) -> String {
    let payload = match exp {
        Some(exp) => format!(r#"{{"sub":"u-test","exp":{}}}"#, exp),
        None => r#"{"sub":"u-test"}"#.to_string(),
    };
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

pub fn valid_jwt() -> String {
    jwt_with_exp(Some(Utc::now().timestamp() + 3600))
}

// =============================================================================
// CAPABILITY FAKES
// =============================================================================

#[derive(Default)]
pub struct RecordingRenderer {
    views: Vec<ListView>,
    cleared: bool,
}

impl RecordingRenderer {
    pub fn last(&self) -> Option<&ListView> {
        self.views.last()
    }

    pub fn views(&self) -> &[ListView] {
        &self.views
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }
}

impl ReportRenderer for RecordingRenderer {
    fn render(&mut self, view: &ListView) -> Result<()> {
        self.views.push(view.clone());
        self.cleared = false;
        Ok(())
    }

    fn clear(&mut self) {
        self.cleared = true;
    }
}

#[derive(Default)]
pub struct RecordingNotificationRenderer {
    views: Vec<NotificationView>,
}

impl RecordingNotificationRenderer {
    pub fn last(&self) -> Option<&NotificationView> {
        self.views.last()
    }

    pub fn views(&self) -> &[NotificationView] {
        &self.views
    }
}

impl NotificationRenderer for RecordingNotificationRenderer {
    fn render(&mut self, view: &NotificationView) -> Result<()> {
        self.views.push(view.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        self.visits.lock().unwrap().push(target.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Session store whose every operation fails.
pub struct FailingSessionStore;

impl SessionStore for FailingSessionStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(AppError::Storage("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(AppError::Storage("disk unavailable".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(AppError::Storage("disk unavailable".to_string()))
    }

    fn clear(&self) -> Result<()> {
        Err(AppError::Storage("disk unavailable".to_string()))
    }
}

// =============================================================================
// BACKEND FAKES
// =============================================================================

/// Failure a fake backend call should produce.
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Network(String),
    Api(String),
    Unauthorized,
}

impl FakeFailure {
    pub fn to_error(&self) -> AppError {
        match self {
            FakeFailure::Network(m) => AppError::Network(m.clone()),
            FakeFailure::Api(m) => AppError::Api(m.clone()),
            FakeFailure::Unauthorized => AppError::Unauthorized("Authentication failed".to_string()),
        }
    }
}

#[derive(Default)]
pub struct FakeReportsApi {
    reports: Mutex<Vec<Report>>,
    fetch_failure: Mutex<Option<FakeFailure>>,
    update_failure: Mutex<Option<FakeFailure>>,
    submit_failure: Mutex<Option<FakeFailure>>,
    fetches: AtomicUsize,
    updates: Mutex<Vec<(String, UpdateStatusRequest)>>,
    submissions: Mutex<Vec<ComplaintSubmission>>,
}

impl FakeReportsApi {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        let api = Self::default();
        *api.reports.lock().unwrap() = reports;
        api
    }

    pub fn fail_fetch(&self, failure: FakeFailure) {
        *self.fetch_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_update(&self, failure: FakeFailure) {
        *self.update_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_submit(&self, failure: FakeFailure) {
        *self.submit_failure.lock().unwrap() = Some(failure);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<(String, UpdateStatusRequest)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<ComplaintSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    fn fetch(&self) -> Result<Vec<Report>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.fetch_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(self.reports.lock().unwrap().clone())
    }
}

#[async_trait]
impl ReportsApi for FakeReportsApi {
    async fn get_all_reports(&self) -> Result<Vec<Report>> {
        self.fetch()
    }

    async fn get_my_reports(&self) -> Result<Vec<Report>> {
        self.fetch()
    }

    async fn update_report_status(
        &self,
        report_id: &str,
        request: &UpdateStatusRequest,
    ) -> Result<()> {
        if let Some(failure) = self.update_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        self.updates
            .lock()
            .unwrap()
            .push((report_id.to_string(), request.clone()));

        let mut reports = self.reports.lock().unwrap();
        match reports.iter_mut().find(|r| r.report_id == report_id) {
            Some(r) => {
                r.status = request.new_status;
                r.updated_at = Some(Utc::now());
                Ok(())
            }
            None => Err(AppError::Api("Report not found".to_string())),
        }
    }

    async fn submit(&self, submission: &ComplaintSubmission) -> Result<String> {
        if let Some(failure) = self.submit_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(submission.clone());
        Ok(format!("RPT-{:04}", submissions.len()))
    }
}

#[derive(Default)]
pub struct FakeAnalyticsApi {
    data: DashboardData,
    failure: Option<FakeFailure>,
}

impl FakeAnalyticsApi {
    pub fn with_data(data: DashboardData) -> Self {
        Self {
            data,
            failure: None,
        }
    }

    pub fn failing(failure: FakeFailure) -> Self {
        Self {
            data: DashboardData::default(),
            failure: Some(failure),
        }
    }
}

#[async_trait]
impl AnalyticsApi for FakeAnalyticsApi {
    async fn get_dashboard_data(&self) -> Result<DashboardData> {
        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.data.clone()),
        }
    }
}

#[derive(Default)]
pub struct FakeCategoriesApi {
    categories: Vec<Category>,
    failure: Option<FakeFailure>,
}

impl FakeCategoriesApi {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories,
            failure: None,
        }
    }

    pub fn failing(failure: FakeFailure) -> Self {
        Self {
            categories: Vec::new(),
            failure: Some(failure),
        }
    }
}

#[async_trait]
impl CategoriesApi for FakeCategoriesApi {
    async fn get_all(&self) -> Result<Vec<Category>> {
        match &self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.categories.clone()),
        }
    }
}

#[derive(Default)]
pub struct FakeAuthApi {
    user: Option<User>,
    logout_failure: Option<FakeFailure>,
    logout_calls: AtomicUsize,
}

impl FakeAuthApi {
    pub fn with_user(user: User) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// No current user and a failing logout endpoint.
    pub fn failing() -> Self {
        Self {
            user: None,
            logout_failure: Some(FakeFailure::Network("connection reset".to_string())),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for FakeAuthApi {
    async fn get_current_user(&self) -> Result<User> {
        self.user
            .clone()
            .ok_or_else(|| AppError::Unauthorized("Authentication failed".to_string()))
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        match &self.logout_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct FakeNotificationsApi {
    notifications: Mutex<Vec<Notification>>,
    fetch_failure: Mutex<Option<FakeFailure>>,
    failing_ids: Mutex<HashSet<String>>,
    fetches: AtomicUsize,
    marked: Mutex<Vec<String>>,
}

impl FakeNotificationsApi {
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        let api = Self::default();
        *api.notifications.lock().unwrap() = notifications;
        api
    }

    pub fn fail_fetch(&self, failure: FakeFailure) {
        *self.fetch_failure.lock().unwrap() = Some(failure);
    }

    /// Make `mark_as_read` reject for this id.
    pub fn fail_mark(&self, notification_id: &str) {
        self.failing_ids
            .lock()
            .unwrap()
            .insert(notification_id.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationsApi for FakeNotificationsApi {
    async fn get_my_notifications(&self) -> Result<Vec<Notification>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.fetch_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<()> {
        if self.failing_ids.lock().unwrap().contains(notification_id) {
            return Err(AppError::Network(format!(
                "Failed to mark {} as read",
                notification_id
            )));
        }
        self.marked.lock().unwrap().push(notification_id.to_string());
        if let Some(n) = self
            .notifications
            .lock()
            .unwrap()
            .iter_mut()
            .find(|n| n.notification_id == notification_id)
        {
            n.status = NotificationStatus::Read;
        }
        Ok(())
    }
}

/// Geocoder with canned answers. The default finds nothing.
#[derive(Default)]
pub struct FakeGeocoder {
    address: Option<String>,
    place: Option<GeocodedLocation>,
    fail: bool,
}

impl FakeGeocoder {
    pub fn with_address(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            ..Self::default()
        }
    }

    pub fn with_place(place: GeocodedLocation) -> Self {
        Self {
            place: Some(place),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn reverse(&self, _lat: f64, _lng: f64) -> Result<String> {
        if self.fail {
            return Err(AppError::ExternalServiceError("geocoder down".to_string()));
        }
        Ok(self
            .address
            .clone()
            .unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string()))
    }

    async fn search(&self, _query: &str) -> Result<Option<GeocodedLocation>> {
        if self.fail {
            return Err(AppError::ExternalServiceError("geocoder down".to_string()));
        }
        Ok(self.place.clone())
    }
}
