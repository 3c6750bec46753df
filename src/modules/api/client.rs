use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result, WizardField};
use crate::features::auth::store::SessionStore;
use crate::features::categories::Category;
use crate::features::dashboard::models::DashboardData;
use crate::features::notifications::models::Notification;
use crate::features::reports::models::{
    Attachment, ComplaintSubmission, Report, SubmittedReport, UpdateStatusRequest,
};
use crate::features::users::User;
use crate::modules::api::{AnalyticsApi, AuthApi, CategoriesApi, NotificationsApi, ReportsApi};
use crate::shared::types::{Ack, ApiResponse};

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP client for the complaint backend.
///
/// The bearer token is read from the session store on every request, so a
/// logout elsewhere takes effect immediately.
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("civic-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let request_id = uuid::Uuid::now_v7().to_string();
        let mut builder = self
            .http_client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id);

        if let Some(token) = self.session.token()? {
            builder = builder.bearer_auth(token);
        }

        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            AppError::Network(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            AppError::Network(format!("Failed to read response: {}", e))
        })?;

        tracing::debug!("{} -> HTTP {}", url, status);
        parse_envelope(status, &body)
    }

    async fn get_data<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path)?;
        let envelope: ApiResponse<T> = self.send(builder).await?;
        Ok(envelope.into_result()?.unwrap_or_default())
    }
}

/// Decode a backend reply, mapping auth and transport status codes first.
fn parse_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<ApiResponse<T>> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = serde_json::from_slice::<Ack>(body)
            .ok()
            .and_then(|a| a.message)
            .unwrap_or_else(|| format!("Authentication failed (HTTP {})", status.as_u16()));
        tracing::warn!("Backend rejected credentials: {}", message);
        return Err(AppError::Unauthorized(message));
    }

    if !status.is_success() {
        let message = serde_json::from_slice::<Ack>(body)
            .ok()
            .and_then(|a| a.into_result().err())
            .map(|e| e.to_string())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        tracing::error!("Backend error: HTTP {} - {}", status, message);
        return Err(AppError::Api(message));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Failed to parse response envelope: {}", e);
        AppError::Api(format!("Failed to parse response: {}", e))
    })
}

fn file_part(attachment: &Attachment, field: WizardField) -> Result<Part> {
    Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.content_type)
        .map_err(|e| AppError::invalid(field, format!("Invalid file type: {}", e)))
}

fn submission_form(submission: &ComplaintSubmission) -> Result<Form> {
    let mut form = Form::new()
        .text("title", submission.title.clone())
        .text("description", submission.description.clone())
        .text("categoryId", submission.category_id.clone())
        .text("locationLat", submission.location_lat.to_string())
        .text("locationLng", submission.location_lng.to_string())
        .part("photo", file_part(&submission.photo, WizardField::Photo)?);

    if let Some(recording) = &submission.voice_recording {
        form = form.part("voiceRecording", file_part(recording, WizardField::Audio)?);
    }

    Ok(form)
}

#[async_trait]
impl ReportsApi for ApiClient {
    async fn get_all_reports(&self) -> Result<Vec<Report>> {
        self.get_data("reports").await
    }

    async fn get_my_reports(&self) -> Result<Vec<Report>> {
        self.get_data("reports/my-reports").await
    }

    async fn update_report_status(
        &self,
        report_id: &str,
        request: &UpdateStatusRequest,
    ) -> Result<()> {
        let path = format!("reports/{}/status", urlencoding::encode(report_id));
        let builder = self.request(Method::PATCH, &path)?.json(request);
        let ack: Ack = self.send(builder).await?;
        ack.into_result()?;

        tracing::info!("Report {} moved to {}", report_id, request.new_status);
        Ok(())
    }

    async fn submit(&self, submission: &ComplaintSubmission) -> Result<String> {
        let form = submission_form(submission)?;
        let builder = self.request(Method::POST, "reports")?.multipart(form);
        let envelope: ApiResponse<SubmittedReport> = self.send(builder).await?;
        let created = envelope.into_data()?;

        tracing::info!("Complaint submitted as {}", created.report_id);
        Ok(created.report_id)
    }
}

#[async_trait]
impl AnalyticsApi for ApiClient {
    async fn get_dashboard_data(&self) -> Result<DashboardData> {
        self.get_data("analytics/dashboard").await
    }
}

#[async_trait]
impl CategoriesApi for ApiClient {
    async fn get_all(&self) -> Result<Vec<Category>> {
        self.get_data("categories").await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn get_current_user(&self) -> Result<User> {
        let builder = self.request(Method::GET, "auth/me")?;
        let envelope: ApiResponse<User> = self.send(builder).await?;
        envelope.into_data()
    }

    async fn logout(&self) -> Result<()> {
        let builder = self.request(Method::POST, "auth/logout")?;
        let ack: Ack = self.send(builder).await?;
        ack.into_result().map(|_| ())
    }
}

#[async_trait]
impl NotificationsApi for ApiClient {
    async fn get_my_notifications(&self) -> Result<Vec<Notification>> {
        self.get_data("notifications/my-notifications").await
    }

    async fn mark_as_read(&self, notification_id: &str) -> Result<()> {
        let path = format!("notifications/{}/read", urlencoding::encode(notification_id));
        let builder = self.request(Method::PATCH, &path)?;
        let ack: Ack = self.send(builder).await?;
        ack.into_result().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::store::MemorySessionStore;
    use std::time::Duration;

    fn client(token: Option<&str>) -> ApiClient {
        let store: Arc<dyn SessionStore> = match token {
            Some(t) => Arc::new(MemorySessionStore::with_token(t)),
            None => Arc::new(MemorySessionStore::new()),
        };
        let config = ApiConfig {
            base_url: "https://api.example.com/api/".to_string(),
            timeout: Duration::from_secs(5),
        };
        ApiClient::new(&config, store).unwrap()
    }

    #[test]
    fn test_request_headers() {
        let request = client(Some("tok-1"))
            .request(Method::GET, "/reports")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "https://api.example.com/api/reports");
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer tok-1"
        );
        let request_id = request.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_no_token_no_bearer() {
        let request = client(None)
            .request(Method::GET, "reports")
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_parse_envelope_success() {
        let body = br#"{"success": true, "data": [{"categoryId": "c-1", "name": "Roads"}]}"#;
        let envelope: ApiResponse<Vec<Category>> = parse_envelope(StatusCode::OK, body).unwrap();
        assert_eq!(envelope.into_data().unwrap()[0].name, "Roads");
    }

    #[test]
    fn test_parse_envelope_failures() {
        let unauthorized = parse_envelope::<Ack>(StatusCode::UNAUTHORIZED, b"");
        assert!(matches!(unauthorized, Err(AppError::Unauthorized(_))));

        let forbidden = parse_envelope::<Ack>(StatusCode::FORBIDDEN, br#"{"success": false, "message": "Admins only"}"#);
        assert!(matches!(forbidden, Err(AppError::Unauthorized(m)) if m == "Admins only"));

        let server = parse_envelope::<Ack>(
            StatusCode::BAD_REQUEST,
            br#"{"success": false, "message": "Invalid status"}"#,
        );
        assert!(matches!(server, Err(AppError::Api(m)) if m.contains("Invalid status")));

        let garbage = parse_envelope::<Ack>(StatusCode::BAD_GATEWAY, b"<html>");
        assert!(matches!(garbage, Err(AppError::Api(m)) if m == "HTTP 502"));
    }

    #[test]
    fn test_success_false_is_api_error() {
        let envelope: ApiResponse<Vec<Report>> = parse_envelope(
            StatusCode::OK,
            br#"{"success": false, "message": "Could not fetch complaints."}"#,
        )
        .unwrap();
        assert!(matches!(envelope.into_result(), Err(AppError::Api(m)) if m == "Could not fetch complaints."));
    }

    #[test]
    fn test_submission_form_rejects_bad_mime() {
        let submission = ComplaintSubmission {
            title: "t".into(),
            description: "d".into(),
            category_id: "c".into(),
            location_lat: 1.0,
            location_lng: 2.0,
            photo: Attachment::new("p.jpg", "not a mime", vec![1]),
            voice_recording: None,
        };
        assert!(matches!(
            submission_form(&submission),
            Err(AppError::Validation { field: WizardField::Photo, .. })
        ));
    }
}
