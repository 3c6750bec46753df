pub mod auth;
pub mod categories;
pub mod complaints;
pub mod dashboard;
pub mod notifications;
pub mod reports;
pub mod users;
pub mod wizard;
