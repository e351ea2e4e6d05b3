// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Wodland";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "wodland";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".wodland";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "wodland.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "WODLAND_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "WODLAND_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "WODLAND_HOST";

/// Environment variable for server port (platform convention, e.g. Heroku)
pub const ENV_PORT: &str = "PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "WODLAND_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "WODLAND_DATA_DIR";

// =============================================================================
// Server Defaults
// =============================================================================

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 8080;

/// Default request body limit for JSON endpoints
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for the login endpoint
pub const AUTH_BODY_LIMIT: usize = 64 * 1024;

/// Max time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Authentication
// =============================================================================

/// Environment variable for the JWT signing secret
pub const ENV_JWT_SECRET: &str = "WODLAND_JWT_SECRET";

/// Cookie carrying the token for browser clients
pub const JWT_COOKIE_NAME: &str = "jwt";

/// Query parameter accepted as a token source
pub const JWT_QUERY_PARAM: &str = "token";

/// Token lifetime
pub const DEFAULT_TOKEN_TIMEOUT_MINUTES: i64 = 60;

/// Window after issue during which a token may be refreshed
pub const DEFAULT_MAX_REFRESH_MINUTES: i64 = 60;

/// Role assigned by `wodland user add` when none is given
pub const DEFAULT_USER_ROLE: &str = "user";

// =============================================================================
// SQLite
// =============================================================================

pub const SQLITE_DB_FILENAME: &str = "wodland.db";

pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// Negative value means KiB (64 MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Database Backends
// =============================================================================

/// Environment variable to select the transactional backend
pub const ENV_TRANSACTIONAL_BACKEND: &str = "WODLAND_DB_BACKEND";

/// PostgreSQL connection URL (platform convention)
pub const ENV_POSTGRES_URL: &str = "DATABASE_URL";

// =============================================================================
// PostgreSQL Defaults
// =============================================================================

pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;

pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

/// Interval between pool health checks
pub const POSTGRES_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;
