//! Notification list with read/unread state.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{Notification, NotificationStatus};
use crate::features::notifications::renderer::{
    build_view, NotificationRenderer, NotificationView, LOAD_ERROR_MESSAGE,
};
use crate::modules::api::NotificationsApi;

pub struct NotificationCenter<R: NotificationRenderer> {
    api: Arc<dyn NotificationsApi>,
    renderer: R,
    notifications: Vec<Notification>,
}

impl<R: NotificationRenderer> NotificationCenter<R> {
    pub fn new(api: Arc<dyn NotificationsApi>, renderer: R) -> Self {
        Self {
            api,
            renderer,
            notifications: Vec::new(),
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read()).count()
    }

    /// Fetch the user's notifications and redraw. A failed fetch shows the
    /// error state and keeps nothing from the previous load.
    pub async fn load(&mut self) -> Result<()> {
        self.renderer.render(&NotificationView::Loading)?;

        match self.api.get_my_notifications().await {
            Ok(notifications) => {
                tracing::debug!("Loaded {} notifications", notifications.len());
                self.notifications = notifications;
                self.redraw()
            }
            Err(e) => {
                tracing::error!("Failed to load notifications: {}", e);
                self.notifications.clear();
                self.renderer
                    .render(&NotificationView::Error(LOAD_ERROR_MESSAGE.to_string()))?;
                Err(e)
            }
        }
    }

    /// Local state only flips after the backend confirms.
    pub async fn mark_one_as_read(&mut self, notification_id: &str) -> Result<()> {
        let index = self
            .notifications
            .iter()
            .position(|n| n.notification_id == notification_id)
            .ok_or_else(|| AppError::NotFound(format!("Notification {}", notification_id)))?;

        if let Err(e) = self.api.mark_as_read(notification_id).await {
            tracing::error!("Failed to mark notification {} as read: {}", notification_id, e);
            return Err(e);
        }

        self.notifications[index].status = NotificationStatus::Read;
        self.redraw()
    }

    /// Mark every unread notification concurrently.
    ///
    /// The list is reloaded only when every write succeeded; otherwise the
    /// first failure is returned and local state is left as it was.
    pub async fn mark_all_as_read(&mut self) -> Result<()> {
        let unread: Vec<String> = self
            .notifications
            .iter()
            .filter(|n| !n.is_read())
            .map(|n| n.notification_id.clone())
            .collect();

        if unread.is_empty() {
            return Ok(());
        }

        let api = self.api.as_ref();
        let results = join_all(unread.iter().map(|id| api.mark_as_read(id))).await;

        let failures: Vec<AppError> = results.into_iter().filter_map(|r| r.err()).collect();
        if let Some(first) = failures.into_iter().next() {
            tracing::error!("Failed to mark all notifications as read: {}", first);
            return Err(first);
        }

        tracing::info!("Marked {} notifications as read", unread.len());
        self.load().await
    }

    fn redraw(&mut self) -> Result<()> {
        let view = build_view(&self.notifications, &Utc::now());
        self.renderer.render(&view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        notification, FakeFailure, FakeNotificationsApi, RecordingNotificationRenderer,
    };
    use tokio_test::{assert_err, assert_ok};

    fn center(api: Arc<FakeNotificationsApi>) -> NotificationCenter<RecordingNotificationRenderer> {
        NotificationCenter::new(api, RecordingNotificationRenderer::default())
    }

    fn three_unread() -> Vec<Notification> {
        vec![
            notification("n-1", NotificationStatus::Unread),
            notification("n-2", NotificationStatus::Unread),
            notification("n-3", NotificationStatus::Unread),
        ]
    }

    #[tokio::test]
    async fn test_load_renders_items() {
        let api = Arc::new(FakeNotificationsApi::with_notifications(vec![
            notification("n-1", NotificationStatus::Unread),
            notification("n-2", NotificationStatus::Read),
        ]));
        let mut c = center(api);

        c.load().await.unwrap();
        assert_eq!(c.unread_count(), 1);
        assert_eq!(c.renderer().views()[0], NotificationView::Loading);
        assert!(matches!(c.renderer().last(), Some(NotificationView::Items(items)) if items.len() == 2));
    }

    #[tokio::test]
    async fn test_load_failure_shows_error() {
        let api = Arc::new(FakeNotificationsApi::default());
        api.fail_fetch(FakeFailure::Network("offline".into()));
        let mut c = center(api);

        assert!(c.load().await.is_err());
        assert_eq!(
            c.renderer().last(),
            Some(&NotificationView::Error(LOAD_ERROR_MESSAGE.to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_list() {
        let mut c = center(Arc::new(FakeNotificationsApi::default()));
        c.load().await.unwrap();
        assert!(matches!(c.renderer().last(), Some(NotificationView::Empty { .. })));
    }

    #[tokio::test]
    async fn test_mark_one_only_flips_on_success() {
        let api = Arc::new(FakeNotificationsApi::with_notifications(three_unread()));
        api.fail_mark("n-2");
        let mut c = center(api.clone());
        c.load().await.unwrap();

        c.mark_one_as_read("n-1").await.unwrap();
        assert!(c.notifications()[0].is_read());

        assert_err!(c.mark_one_as_read("n-2").await);
        assert!(!c.notifications()[1].is_read());
        assert_eq!(c.unread_count(), 2);

        assert!(matches!(
            c.mark_one_as_read("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_mark_all_reloads_on_success() {
        let api = Arc::new(FakeNotificationsApi::with_notifications(three_unread()));
        let mut c = center(api.clone());
        c.load().await.unwrap();

        assert_ok!(c.mark_all_as_read().await);
        assert_eq!(api.marked().len(), 3);
        assert_eq!(api.fetch_count(), 2);
        assert_eq!(c.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_all_with_one_failure_keeps_state() {
        let api = Arc::new(FakeNotificationsApi::with_notifications(three_unread()));
        api.fail_mark("n-3");
        let mut c = center(api.clone());
        c.load().await.unwrap();

        assert_err!(c.mark_all_as_read().await);
        // no reload, local state untouched
        assert_eq!(api.fetch_count(), 1);
        assert_eq!(c.unread_count(), 3);
    }

    #[tokio::test]
    async fn test_mark_all_with_nothing_unread() {
        let api = Arc::new(FakeNotificationsApi::with_notifications(vec![notification(
            "n-1",
            NotificationStatus::Read,
        )]));
        let mut c = center(api.clone());
        c.load().await.unwrap();

        c.mark_all_as_read().await.unwrap();
        assert!(api.marked().is_empty());
        assert_eq!(api.fetch_count(), 1);
    }
}
