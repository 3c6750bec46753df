use thiserror::Error;

/// Fields the complaint wizard requires before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    Photo,
    Category,
    Description,
    Location,
    Audio,
}

impl WizardField {
    /// Blocking message shown when the field is missing at submit time.
    pub fn missing_message(&self) -> &'static str {
        match self {
            WizardField::Photo => "Please upload a photo of the issue.",
            WizardField::Category => "Please select a category for your complaint.",
            WizardField::Description => "Please provide a description of the issue.",
            WizardField::Location => "Please select a location for your complaint.",
            WizardField::Audio => "Please select a valid audio file.",
        }
    }
}

impl std::fmt::Display for WizardField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardField::Photo => write!(f, "photo"),
            WizardField::Category => write!(f, "category"),
            WizardField::Description => write!(f, "description"),
            WizardField::Location => write!(f, "location"),
            WizardField::Audio => write!(f, "audio"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{message}")]
    Validation { field: WizardField, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    /// Validation failure carrying the standard message for the field.
    pub fn missing(field: WizardField) -> Self {
        AppError::Validation {
            field,
            message: field.missing_message().to_string(),
        }
    }

    pub fn invalid(field: WizardField, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Auth failures are always fatal to the session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// Message suitable for an inline banner or alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::Unauthorized(_) => "Your session has expired. Please log in again.".to_string(),
            AppError::Api(msg) | AppError::Network(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(e: minijinja::Error) -> Self {
        tracing::error!("Template rendering failed: {:?}", e);
        AppError::Template(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
