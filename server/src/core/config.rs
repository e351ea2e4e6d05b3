use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_MAX_REFRESH_MINUTES, DEFAULT_PORT,
    DEFAULT_TOKEN_TIMEOUT_MINUTES, ENV_POSTGRES_URL, POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS,
    POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS, POSTGRES_DEFAULT_MAX_CONNECTIONS,
    POSTGRES_DEFAULT_MAX_LIFETIME_SECS, POSTGRES_DEFAULT_MIN_CONNECTIONS,
    POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// Transactional Backend Enum (SQLite or PostgreSQL)
// =============================================================================

/// Database backend for users, WODs and activities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionalBackend {
    #[default]
    Sqlite,
    Postgres,
}

impl fmt::Display for TransactionalBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionalBackend::Sqlite => write!(f, "sqlite"),
            TransactionalBackend::Postgres => write!(f, "postgres"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON, every field optional)
// =============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthFileConfig {
    /// Token signing secret (or use WODLAND_JWT_SECRET env var)
    pub secret: Option<String>,
    pub timeout_minutes: Option<i64>,
    pub max_refresh_minutes: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PostgresFileConfig {
    /// PostgreSQL connection URL (or use DATABASE_URL env var)
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
    /// Statement timeout in seconds, 0 to disable
    pub statement_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// sqlite (default) or postgres
    #[serde(alias = "backend")]
    pub transactional: Option<TransactionalBackend>,
    pub postgres: Option<PostgresFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub auth: Option<AuthFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown top-level fields (likely typos)
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str = map.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
            tracing::warn!(fields = %keys_str, "Unknown fields in config file (possible typos)");
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                current.host = server.host;
            }
            if server.port.is_some() {
                current.port = server.port;
            }
        }

        if let Some(auth) = other.auth {
            let current = self.auth.get_or_insert_with(AuthFileConfig::default);
            if auth.secret.is_some() {
                tracing::trace!(secret = "***", "Merging auth.secret");
                current.secret = auth.secret;
            }
            if auth.timeout_minutes.is_some() {
                current.timeout_minutes = auth.timeout_minutes;
            }
            if auth.max_refresh_minutes.is_some() {
                current.max_refresh_minutes = auth.max_refresh_minutes;
            }
        }

        if let Some(database) = other.database {
            let current = self.database.get_or_insert_with(DatabaseFileConfig::default);
            if database.transactional.is_some() {
                current.transactional = database.transactional;
            }
            if let Some(postgres) = database.postgres {
                let current_pg = current
                    .postgres
                    .get_or_insert_with(PostgresFileConfig::default);
                if postgres.url.is_some() {
                    tracing::trace!(url = "***", "Merging database.postgres.url");
                    current_pg.url = postgres.url;
                }
                if postgres.max_connections.is_some() {
                    current_pg.max_connections = postgres.max_connections;
                }
                if postgres.min_connections.is_some() {
                    current_pg.min_connections = postgres.min_connections;
                }
                if postgres.acquire_timeout_secs.is_some() {
                    current_pg.acquire_timeout_secs = postgres.acquire_timeout_secs;
                }
                if postgres.idle_timeout_secs.is_some() {
                    current_pg.idle_timeout_secs = postgres.idle_timeout_secs;
                }
                if postgres.max_lifetime_secs.is_some() {
                    current_pg.max_lifetime_secs = postgres.max_lifetime_secs;
                }
                if postgres.statement_timeout_secs.is_some() {
                    current_pg.statement_timeout_secs = postgres.statement_timeout_secs;
                }
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Token issuing settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing secret; `None` means generate one per process
    pub secret: Option<String>,
    pub timeout_minutes: i64,
    pub max_refresh_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            timeout_minutes: DEFAULT_TOKEN_TIMEOUT_MINUTES,
            max_refresh_minutes: DEFAULT_MAX_REFRESH_MINUTES,
        }
    }
}

/// PostgreSQL configuration (final/runtime)
///
/// Zero values fall back to the pool defaults when the service starts.
#[derive(Debug, Clone, Default)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub statement_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub transactional: TransactionalBackend,
    /// Only populated when transactional = postgres
    pub postgres: Option<PostgresConfig>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.wodland/wodland.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut file_config = FileConfig::default();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            local.exists().then_some(local)
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
        }

        Self::from_layers(cli, file_config)
    }

    /// Combine a merged file config with CLI/env overrides and validate
    fn from_layers(cli: &CliConfig, file_config: FileConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_auth = file_config.auth.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let auth = AuthConfig {
            secret: cli
                .jwt_secret
                .clone()
                .or(file_auth.secret)
                .filter(|s| !s.is_empty()),
            timeout_minutes: file_auth
                .timeout_minutes
                .unwrap_or(DEFAULT_TOKEN_TIMEOUT_MINUTES),
            max_refresh_minutes: file_auth
                .max_refresh_minutes
                .unwrap_or(DEFAULT_MAX_REFRESH_MINUTES),
        };

        let transactional = cli
            .transactional_backend
            .or(file_database.transactional)
            .unwrap_or_default();

        let postgres = if transactional == TransactionalBackend::Postgres {
            let file_pg = file_database.postgres.unwrap_or_default();
            Some(PostgresConfig {
                url: cli.postgres_url.clone().or(file_pg.url).unwrap_or_default(),
                max_connections: file_pg
                    .max_connections
                    .unwrap_or(POSTGRES_DEFAULT_MAX_CONNECTIONS),
                min_connections: file_pg
                    .min_connections
                    .unwrap_or(POSTGRES_DEFAULT_MIN_CONNECTIONS),
                acquire_timeout_secs: file_pg
                    .acquire_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS),
                idle_timeout_secs: file_pg
                    .idle_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS),
                max_lifetime_secs: file_pg
                    .max_lifetime_secs
                    .unwrap_or(POSTGRES_DEFAULT_MAX_LIFETIME_SECS),
                statement_timeout_secs: file_pg
                    .statement_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS),
            })
        } else {
            None
        };

        let config = Self {
            server: ServerConfig { host, port },
            auth,
            database: DatabaseConfig {
                transactional,
                postgres,
            },
            debug: cli.debug || file_config.debug.unwrap_or(false),
        };

        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.database.transactional,
            debug = config.debug,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.auth.timeout_minutes <= 0 {
            anyhow::bail!("Configuration error: auth.timeout_minutes must be greater than 0");
        }

        if self.auth.max_refresh_minutes < 0 {
            anyhow::bail!("Configuration error: auth.max_refresh_minutes must not be negative");
        }

        if self.database.transactional == TransactionalBackend::Postgres
            && self
                .database
                .postgres
                .as_ref()
                .is_none_or(|pg| pg.url.is_empty())
        {
            anyhow::bail!(
                "Configuration error: database.postgres.url is required when database.transactional is 'postgres'. \
                 Set via {} env var or database.postgres.url in config file.",
                ENV_POSTGRES_URL
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.wodland/wodland.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
