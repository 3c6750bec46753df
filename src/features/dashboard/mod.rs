pub mod activity;
pub mod cards;
pub mod modal;
pub mod models;
pub mod page;

pub use cards::{ChartSeries, StatCards};
pub use modal::{Modal, ReportDetail, StatusEditor};
pub use page::AdminDashboard;
