use chrono::{DateTime, Utc};
use minijinja::context;
use serde::Serialize;

use crate::core::error::Result;
use crate::features::notifications::models::Notification;
use crate::shared::format::format_time_ago;
use crate::shared::templates::{render_view, NOTIFICATIONS};

pub const EMPTY_MESSAGE: &str = "You're all caught up!";
pub const LOAD_ERROR_MESSAGE: &str = "Could not load notifications. Please try again.";

pub trait NotificationRenderer {
    fn render(&mut self, view: &NotificationView) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationView {
    Loading,
    Error(String),
    Empty { message: String },
    Items(Vec<NotificationItem>),
}

/// One notification projected for the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationItem {
    pub notification_id: String,
    pub state_class: &'static str,
    pub icon: &'static str,
    pub message: String,
    pub report_title: Option<String>,
    pub time_ago: String,
    /// Only unread items offer the mark-as-read action
    pub can_mark_read: bool,
}

impl NotificationItem {
    pub fn from_notification(notification: &Notification, now: &DateTime<Utc>) -> Self {
        Self {
            notification_id: notification.notification_id.clone(),
            state_class: notification.status.as_str(),
            icon: notification.notification_type.display().icon,
            message: notification.message.clone(),
            report_title: notification.report_title().map(str::to_string),
            time_ago: format_time_ago(&notification.created_at, now),
            can_mark_read: !notification.is_read(),
        }
    }
}

pub fn build_view(notifications: &[Notification], now: &DateTime<Utc>) -> NotificationView {
    if notifications.is_empty() {
        return NotificationView::Empty {
            message: EMPTY_MESSAGE.to_string(),
        };
    }
    NotificationView::Items(
        notifications
            .iter()
            .map(|n| NotificationItem::from_notification(n, now))
            .collect(),
    )
}

#[derive(Debug, Clone, Default)]
pub struct HtmlNotificationRenderer {
    html: String,
}

impl HtmlNotificationRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl NotificationRenderer for HtmlNotificationRenderer {
    fn render(&mut self, view: &NotificationView) -> Result<()> {
        let ctx = match view {
            NotificationView::Loading => context! { state => "loading" },
            NotificationView::Error(message) => context! { state => "error", message => message },
            NotificationView::Empty { message } => {
                context! { state => "empty", message => message }
            }
            NotificationView::Items(items) => context! { state => "items", items => items },
        };

        self.html = render_view(NOTIFICATIONS, ctx)?;
        Ok(())
    }
}
