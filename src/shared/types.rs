use serde::{Deserialize, Serialize};

use crate::core::error::{AppError, Result};

/// Response envelope every backend endpoint replies with.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            data: None,
            message,
            errors,
        }
    }

    /// Unwrap a successful envelope, turning `success: false` into an API error.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AppError::Api(self.failure_message()))
        }
    }

    /// Like `into_result`, but a successful envelope without data is an error too.
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(AppError::Api(self.failure_message()));
        }
        self.data
            .ok_or_else(|| AppError::Api("Response contained no data".to_string()))
    }

    fn failure_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.errors.as_ref().and_then(|e| e.first().cloned()))
            .unwrap_or_else(|| "Request failed".to_string())
    }
}

/// Write acknowledgement for endpoints that only report `{success}`.
pub type Ack = ApiResponse<serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_failure_uses_message() {
        let json = r#"{"success": false, "data": null, "message": "Report not found"}"#;
        let resp: ApiResponse<Vec<String>> = serde_json::from_str(json).unwrap();

        match resp.into_result() {
            Err(AppError::Api(msg)) => assert_eq!(msg, "Report not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_envelope_failure_falls_back_to_errors() {
        let resp: ApiResponse<()> =
            ApiResponse::error(None, Some(vec!["status is invalid".to_string()]));

        match resp.into_data() {
            Err(AppError::Api(msg)) => assert_eq!(msg, "status is invalid"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_envelope_success_without_data() {
        let json = r#"{"success": true}"#;
        let resp: ApiResponse<Vec<String>> = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert!(resp.into_data().is_err());
    }
}
