use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::core::error::Result;
use crate::features::users::models::User;
use crate::shared::format::{capitalize, format_long_date};

/// Name and role shown in the page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileHeader {
    pub name: String,
    pub role: String,
}

impl ProfileHeader {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.display_name().to_string(),
            role: user
                .role
                .as_deref()
                .filter(|r| !r.is_empty())
                .map(capitalize)
                .unwrap_or_else(|| "Citizen".to_string()),
        }
    }

    pub fn guest() -> Self {
        Self {
            name: "Guest".to_string(),
            role: String::new(),
        }
    }

    /// Header for a fetch outcome; failures are logged and show a guest.
    pub fn from_result(result: Result<User>) -> Self {
        match result {
            Ok(user) => Self::from_user(&user),
            Err(e) => {
                tracing::error!("Error fetching user profile: {}", e);
                Self::guest()
            }
        }
    }
}

/// Date line under the header, e.g. `Friday, 16 October 2026`.
pub fn header_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format_long_date(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_from_user() {
        let user = User {
            user_id: None,
            name: Some("Meera".into()),
            username: None,
            email: None,
            role: Some("department_admin".into()),
        };
        let header = ProfileHeader::from_user(&user);
        assert_eq!(header.name, "Meera");
        assert_eq!(header.role, "Department_admin");
    }

    #[test]
    fn test_failure_shows_guest() {
        let header = ProfileHeader::from_result(Err(AppError::Network("offline".into())));
        assert_eq!(header, ProfileHeader::guest());
    }

    #[test]
    fn test_header_date_in_local_offset() {
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 20, 0, 0).unwrap();
        assert_eq!(header_date(&now), "Thursday, 15 October 2026");
        assert_eq!(header_date(&now.with_timezone(&ist)), "Friday, 16 October 2026");
    }
}
