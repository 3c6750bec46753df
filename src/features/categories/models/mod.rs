mod category;

pub use category::{default_categories, Category};
