pub mod models;
pub mod profile;

pub use models::{User, UserRole};
pub use profile::{header_date, ProfileHeader};
