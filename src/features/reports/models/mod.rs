mod report;
mod submission;

pub(crate) use report::populated_or_none;
pub use report::{CategoryRef, Report, ReportPriority, ReportStatus, ReporterRef, UpdateStatusRequest};
pub use submission::{Attachment, ComplaintSubmission, SubmittedReport};
