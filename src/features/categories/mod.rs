pub mod models;

pub use models::{default_categories, Category};
