/// Rows per page in the admin issues table
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Maximum characters shown for a description on a complaint tile
pub const TILE_DESCRIPTION_LIMIT: usize = 120;

/// Characters of the report id shown in the admin table
pub const TABLE_ID_PREFIX_LEN: usize = 12;

/// Characters of the report id shown in recent activity
pub const ACTIVITY_ID_PREFIX_LEN: usize = 8;

// =============================================================================
// SESSION STORAGE KEYS
// =============================================================================

pub const SESSION_TOKEN_KEY: &str = "token";
pub const SESSION_USER_KEY: &str = "user";
pub const SESSION_REFRESH_TOKEN_KEY: &str = "refreshToken";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Roles allowed onto the admin pages
pub const ADMIN_ROLES: &[&str] = &["admin", "super_admin", "department_admin"];

// =============================================================================
// COMPLAINT WIZARD
// =============================================================================

/// Maximum photo upload size (10MB, matches backend)
pub const MAX_PHOTO_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Image MIME types accepted for the complaint photo
pub const ALLOWED_PHOTO_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Maximum description length in characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Words of the description used in the generated title
pub const TITLE_WORD_COUNT: usize = 5;

pub const RECORDING_FILE_NAME: &str = "voice-recording.webm";
pub const RECORDING_CONTENT_TYPE: &str = "audio/webm";

/// Map zoom used after detecting or searching a location
pub const LOCATION_ZOOM: u8 = 16;

// =============================================================================
// DISPLAY FALLBACKS
// =============================================================================

pub const NOT_AVAILABLE: &str = "N/A";
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x200?text=No+Image";
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps";
