pub mod center;
pub mod models;
pub mod renderer;

pub use center::NotificationCenter;
pub use models::{Notification, NotificationStatus, NotificationType};
pub use renderer::{HtmlNotificationRenderer, NotificationRenderer, NotificationView};
