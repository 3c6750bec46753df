use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub dashboard: DashboardConfig,
    pub geocoding: GeocodingConfig,
}

/// Backend REST API settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Shared session-guard settings used by every page
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// JSON file backing the persisted session (token, user blob)
    pub storage_path: PathBuf,
    /// Entry page to navigate to on logout or expiry
    pub redirect_target: String,
    /// Page admins are sent to when they lack an admin role
    pub login_page: String,
    pub check_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub page_size: usize,
    pub recent_activity_limit: usize,
    /// Offset dates are shown and bucketed in; the machine's local offset when unset
    pub utc_offset: Option<FixedOffset>,
}

/// Nominatim settings for the complaint wizard location step
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            session: SessionConfig::from_env()?,
            dashboard: DashboardConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("API_BASE_URL")
            .map_err(|_| "API_BASE_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = env::var("API_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "API_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SessionConfig {
    const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60 * 60; // 1 hour
    pub const DEFAULT_REDIRECT_TARGET: &'static str = "../../index.html";
    pub const DEFAULT_LOGIN_PAGE: &'static str = "../../login.html";

    pub fn from_env() -> Result<Self, String> {
        let storage_path = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".civic-session.json"));

        let redirect_target = env::var("SESSION_REDIRECT_TARGET")
            .unwrap_or_else(|_| Self::DEFAULT_REDIRECT_TARGET.to_string());

        let login_page =
            env::var("SESSION_LOGIN_PAGE").unwrap_or_else(|_| Self::DEFAULT_LOGIN_PAGE.to_string());

        let check_interval_secs = env::var("SESSION_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CHECK_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_CHECK_INTERVAL_SECS must be a valid number".to_string())?;

        if check_interval_secs == 0 {
            return Err("SESSION_CHECK_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            storage_path,
            redirect_target,
            login_page,
            check_interval: Duration::from_secs(check_interval_secs),
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(".civic-session.json"),
            redirect_target: Self::DEFAULT_REDIRECT_TARGET.to_string(),
            login_page: Self::DEFAULT_LOGIN_PAGE.to_string(),
            check_interval: Duration::from_secs(Self::DEFAULT_CHECK_INTERVAL_SECS),
        }
    }
}

impl DashboardConfig {
    const DEFAULT_PAGE_SIZE: usize = 5;
    const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 3;

    pub fn from_env() -> Result<Self, String> {
        let page_size = env::var("DASHBOARD_PAGE_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_PAGE_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "DASHBOARD_PAGE_SIZE must be a valid number".to_string())?;

        if page_size == 0 {
            return Err("DASHBOARD_PAGE_SIZE must be greater than zero".to_string());
        }

        let recent_activity_limit = env::var("RECENT_ACTIVITY_LIMIT")
            .unwrap_or_else(|_| Self::DEFAULT_RECENT_ACTIVITY_LIMIT.to_string())
            .parse::<usize>()
            .map_err(|_| "RECENT_ACTIVITY_LIMIT must be a valid number".to_string())?;

        let utc_offset = match env::var("DISPLAY_UTC_OFFSET_MINUTES") {
            Ok(raw) => Some(parse_utc_offset(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            page_size,
            recent_activity_limit,
            utc_offset,
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            recent_activity_limit: Self::DEFAULT_RECENT_ACTIVITY_LIMIT,
            utc_offset: None,
        }
    }
}

/// Minutes east of UTC, e.g. `330` for India.
fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let minutes = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| "DISPLAY_UTC_OFFSET_MINUTES must be a whole number of minutes".to_string())?;

    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| "DISPLAY_UTC_OFFSET_MINUTES must be within one day of UTC".to_string())
}

impl GeocodingConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("NOMINATIM_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let user_agent = env::var("GEOCODER_USER_AGENT")
            .unwrap_or_else(|_| "CivicDashboard/1.0 (complaint-tracker)".to_string());

        Ok(Self {
            base_url,
            user_agent,
        })
    }
}
