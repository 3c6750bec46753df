mod analytics;

pub use analytics::{CategoryCount, DashboardData, MonthlySeries};
