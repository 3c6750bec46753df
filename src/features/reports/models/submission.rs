use serde::Deserialize;
use validator::Validate;

use crate::core::error::{AppError, Result, WizardField};

/// A file picked or recorded in the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Multipart body of a new complaint
#[derive(Debug, Clone, Validate)]
pub struct ComplaintSubmission {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub location_lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub location_lng: f64,
    pub photo: Attachment,
    pub voice_recording: Option<Attachment>,
}

impl ComplaintSubmission {
    /// Run the field checks, attributing a failure to the wizard field it belongs to.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(|e| {
            let errors = e.field_errors();
            let field = if errors.contains_key("location_lat") || errors.contains_key("location_lng")
            {
                WizardField::Location
            } else if errors.contains_key("category_id") {
                WizardField::Category
            } else {
                WizardField::Description
            };
            AppError::invalid(field, e.to_string())
        })
    }
}

/// `data` of a successful submission
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedReport {
    #[serde(rename = "reportId")]
    pub report_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::MAX_DESCRIPTION_CHARS;

    fn submission() -> ComplaintSubmission {
        ComplaintSubmission {
            title: "Complaint about pothole".into(),
            description: "Deep pothole".into(),
            category_id: "c-1".into(),
            location_lat: 12.97,
            location_lng: 77.59,
            photo: Attachment::new("p.jpg", "image/jpeg", vec![1, 2, 3]),
            voice_recording: None,
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let mut s = submission();
        s.location_lat = 91.0;
        let errors = s.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("location_lat"));
        assert!(matches!(
            s.check(),
            Err(AppError::Validation { field: WizardField::Location, .. })
        ));
    }

    #[test]
    fn test_description_too_long() {
        let mut s = submission();
        s.description = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert!(s.validate().is_err());
    }
}
