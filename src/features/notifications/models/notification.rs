use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::display::{
    lookup, DisplayConfig, NOTIFICATION_TYPE_FALLBACK, NOTIFICATION_TYPE_TABLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Reminder,
    StatusUpdate,
    NewAssignment,
    #[default]
    #[serde(other)]
    Other,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Reminder => "reminder",
            NotificationType::StatusUpdate => "status_update",
            NotificationType::NewAssignment => "new_assignment",
            NotificationType::Other => "other",
        }
    }

    pub fn display(&self) -> DisplayConfig {
        lookup(
            NOTIFICATION_TYPE_TABLE,
            self.as_str(),
            NOTIFICATION_TYPE_FALLBACK,
        )
        .config
    }
}

/// Anything other than `read` counts as unread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Read,
    #[default]
    #[serde(other)]
    Unread,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Read => "read",
            NotificationStatus::Unread => "unread",
        }
    }
}

/// Report the notification relates to (populated title only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationReportRef {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "notificationId")]
    pub notification_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
    #[serde(default)]
    pub status: NotificationStatus,
    #[serde(
        rename = "reportId",
        default,
        deserialize_with = "crate::features::reports::models::populated_or_none"
    )]
    pub report: Option<NotificationReportRef>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.status == NotificationStatus::Read
    }

    pub fn report_title(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.title.as_deref())
    }
}
