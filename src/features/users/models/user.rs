use serde::{Deserialize, Serialize};

use crate::shared::constants::ADMIN_ROLES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Citizen,
    Admin,
    SuperAdmin,
    DepartmentAdmin,
    /// Unrecognised roles get citizen access
    #[serde(other)]
    Unknown,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::Admin => "admin",
            UserRole::SuperAdmin => "super_admin",
            UserRole::DepartmentAdmin => "department_admin",
            UserRole::Unknown => "unknown",
        }
    }

    pub fn is_admin(&self) -> bool {
        ADMIN_ROLES.contains(&self.as_str())
    }
}

/// Current user as returned by the auth endpoint and stored in the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId", alias = "_id", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Raw role string; kept so unknown roles still display
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    pub fn role(&self) -> UserRole {
        self.role
            .as_deref()
            .and_then(|r| serde_json::from_value(serde_json::Value::String(r.to_string())).ok())
            .unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.username.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>) -> User {
        User {
            user_id: Some("u-1".into()),
            name: None,
            username: None,
            email: None,
            role: role.map(String::from),
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(user(Some("super_admin")).role(), UserRole::SuperAdmin);
        assert_eq!(user(Some("auditor")).role(), UserRole::Unknown);
        assert_eq!(user(None).role(), UserRole::Citizen);
    }

    #[test]
    fn test_admin_gate() {
        assert!(user(Some("admin")).is_admin());
        assert!(user(Some("department_admin")).is_admin());
        assert!(!user(Some("citizen")).is_admin());
        assert!(!user(Some("auditor")).is_admin());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut u = user(None);
        assert_eq!(u.display_name(), "User");
        u.username = Some("asha91".into());
        assert_eq!(u.display_name(), "asha91");
        u.name = Some("Asha".into());
        assert_eq!(u.display_name(), "Asha");
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"userId": "u-9", "name": "Ravi", "email": "ravi@city.gov", "role": "admin"}"#;
        let u: User = serde_json::from_str(json).unwrap();
        assert!(u.is_admin());
        assert_eq!(u.email.as_deref(), Some("ravi@city.gov"));
    }
}
