//! Session token expiry checks.
//!
//! Only the payload's `exp` claim is read; signatures are the backend's job.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::core::error::{AppError, Result};

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    #[serde(default)]
    exp: Option<f64>,
}

/// Outcome of a token check. Everything except `Valid` ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Missing,
    Expired,
    Malformed,
}

impl TokenStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid)
    }
}

/// Decode the optional `exp` claim (seconds since epoch) from a JWT.
///
/// Fails with `Unauthorized` when the token is not a three-part JWT or its
/// payload is not base64url JSON. Padding in the payload is tolerated.
pub fn decode_expiry(token: &str) -> Result<Option<i64>> {
    let malformed = |reason: &str| AppError::Unauthorized(format!("Malformed token: {}", reason));

    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(malformed("expected three segments")),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| malformed("payload is not base64url"))?;
    let claims: ExpiryClaims =
        serde_json::from_slice(&bytes).map_err(|_| malformed("payload is not JSON"))?;

    Ok(claims.exp.map(|e| e.floor() as i64))
}

/// Classify a stored token against `now` (seconds since epoch).
pub fn check_token(token: Option<&str>, now: i64) -> TokenStatus {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return TokenStatus::Missing;
    };

    match decode_expiry(token) {
        Err(e) => {
            tracing::debug!("{}", e);
            TokenStatus::Malformed
        }
        Ok(None) => TokenStatus::Valid,
        Ok(Some(exp)) if exp < now => TokenStatus::Expired,
        Ok(Some(_)) => TokenStatus::Valid,
    }
}
