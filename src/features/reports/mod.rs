pub mod controller;
pub mod filter;
pub mod models;
pub mod paginator;
pub mod renderer;
pub mod stats;
pub mod store;

pub use controller::ReportListController;
pub use filter::{filter_reports, FilterCriteria, SearchScope};
pub use paginator::{paginate, Page, PaginationControls};
pub use renderer::{build_rows, HtmlRenderer, Layout, ListView, ReportRenderer, ReportRow, RowAction, RowActionKind};
pub use stats::ReportStats;
pub use store::RecordStore;
