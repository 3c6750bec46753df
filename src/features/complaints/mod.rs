pub mod page;

pub use page::{ComplaintsPage, ReportScope};
