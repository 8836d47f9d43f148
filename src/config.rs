//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! routes, response headers, defaults and logging. `AppConfig` is the root
//! configuration struct; every section and key is optional and falls back to
//! the defaults below.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Routes and Headers
// =============================================================================

/// Prefix shared by all API routes
pub const API_PREFIX: &str = "/api";

/// Liveness probe route
pub const HEALTH_PATH: &str = formatcp!("{}/health", API_PREFIX);

/// Health responses must never be served from a cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store, max-age=0";

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Defaults
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port, used by both the server and the launcher
pub const DEFAULT_PORT: u16 = 5001;

/// Environment variable that overrides the configured HTTP port
pub const PORT_ENV_VAR: &str = "PORT";

/// Environment variable reported as `environment` by the health check.
/// Set `health.environment_var = "NODE_ENV"` to report what a Node deployment exports.
pub const DEFAULT_ENVIRONMENT_VAR: &str = "APP_ENV";

/// Seconds to wait for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "vitals=debug,tower_http=debug";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Build-time flags
    #[serde(default)]
    pub build: BuildConfig,
    /// Health check settings
    #[serde(default)]
    pub health: HealthConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Graceful shutdown window in seconds
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    /// Pick the port to bind: CLI flag, then the `PORT` environment value, then config.
    ///
    /// An empty environment value is treated as unset. Port 0 is rejected from every source.
    pub fn effective_port(&self, cli: Option<u16>, env: Option<&str>) -> Result<u16, ConfigError> {
        let port = match (cli, env.map(str::trim).filter(|raw| !raw.is_empty())) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw.parse().map_err(|_| {
                ConfigError::Validation(format!("{} must be a port number, got '{}'", PORT_ENV_VAR, raw))
            })?,
            (None, None) => self.port,
        };

        if port == 0 {
            return Err(ConfigError::Validation(
                "port must be between 1 and 65535".to_string(),
            ));
        }
        Ok(port)
    }
}

/// Build flags. These mirror the flags the site is built with and are only
/// reported at startup; none of them changes how requests are handled.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Strict rendering checks during development builds
    #[serde(default = "default_true")]
    pub strict_mode: bool,
    /// Lint failures do not block a build
    #[serde(default = "default_true")]
    pub ignore_lint_errors: bool,
    /// Type-check failures do not block a build
    #[serde(default = "default_true")]
    pub ignore_type_errors: bool,
    /// Images are served as-is, without optimization
    #[serde(default = "default_true")]
    pub unoptimized_images: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strict_mode: true,
            ignore_lint_errors: true,
            ignore_type_errors: true,
            unoptimized_images: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Name of the environment variable reported as `environment`
    #[serde(default = "HealthConfig::default_environment_var")]
    pub environment_var: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            environment_var: Self::default_environment_var(),
        }
    }
}

impl HealthConfig {
    fn default_environment_var() -> String {
        DEFAULT_ENVIRONMENT_VAR.to_string()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// Structured JSON, one object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Like [`AppConfig::load`], but a missing file yields `None`.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        if config.health.environment_var.trim().is_empty() {
            return Err(ConfigError::Validation(
                "health.environment_var must not be empty".to_string(),
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
