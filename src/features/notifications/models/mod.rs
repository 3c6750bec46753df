mod notification;

pub use notification::{Notification, NotificationReportRef, NotificationStatus, NotificationType};
