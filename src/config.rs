//! Configuration for the profile directory service
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PROFILE_DIR_* prefix, plus PORT)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::services::DEFAULT_AVATAR_BASE;

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings
    pub server: ServerSettings,

    /// Default avatar settings
    pub avatar: AvatarSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// TCP port
    pub port: u16,

    /// Tokio worker threads (0 = one per CPU)
    pub worker_threads: usize,
}

/// Default avatar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarSettings {
    /// Avatar endpoint; records get `<base_url>?name=<encoded name>`
    pub base_url: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            worker_threads: 0, // Auto-detect
        }
    }
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AVATAR_BASE.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl ServiceConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::find_config_file(config_path)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse a single TOML file without env overrides or validation
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path).map_err(|source| Error::IoRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            Error::config_parse(format!("{}: {}", path.display(), e.message()), Some(e))
        })?;
        info!(path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Find the configuration file to use
    pub fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::ConfigNotFound { path });
        }

        let search_paths = [
            // Current directory
            Some(PathBuf::from("profile-directory.toml")),
            Some(PathBuf::from("config.toml")),
            // User config directory
            dirs::config_dir().map(|p| p.join("profile-directory").join("config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".profile-directory").join("config.toml")),
            // System config (Linux)
            Some(PathBuf::from("/etc/profile-directory/config.toml")),
        ];

        for path in search_paths.into_iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server settings
        if let Some(val) = lookup("PROFILE_DIR_HOST") {
            self.server.host = val;
        }
        if let Some(n) = lookup("PROFILE_DIR_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|val| val.parse().ok())
        {
            self.server.port = n;
        }
        if let Some(n) = lookup("PROFILE_DIR_WORKER_THREADS").and_then(|val| val.parse().ok()) {
            self.server.worker_threads = n;
        }

        // Avatar settings
        if let Some(val) = lookup("PROFILE_DIR_AVATAR_BASE_URL") {
            self.avatar.base_url = val;
        }

        // Logging settings
        if let Some(val) = lookup("PROFILE_DIR_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("PROFILE_DIR_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Some(val) = lookup("PROFILE_DIR_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Apply `serve` flags, which win over every other source
    pub fn apply_cli_overrides(&mut self, host: Option<&str>, port: Option<u16>) {
        if let Some(host) = host {
            self.server.host = host.to_string();
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::config_field_invalid("server.host", "Host cannot be empty"));
        }
        if self.server.port == 0 {
            return Err(Error::config_field_invalid("server.port", "Port must be between 1 and 65535"));
        }

        let base = Url::parse(&self.avatar.base_url).map_err(|e| {
            Error::config_field_invalid(
                "avatar.base_url",
                format!("Invalid avatar base URL '{}': {}", self.avatar.base_url, e),
            )
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config_field_invalid(
                "avatar.base_url",
                "Avatar base URL must start with http:// or https://",
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// `host:port` for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Runtime worker threads, resolving 0 to the CPU count
    pub fn worker_threads(&self) -> usize {
        match self.server.worker_threads {
            0 => num_cpus::get(),
            n => n,
        }
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location written by `config init`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("profile-directory")
        .join("config.toml")
}

/// Initialize a new configuration file, returning where it was written
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::IoWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|source| Error::IoWrite {
        path: config_path.clone(),
        source,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
pub fn generate_default_config() -> String {
    r#"# Profile Directory Configuration

[server]
# Interface to bind
host = "0.0.0.0"

# TCP port (PORT in the environment also sets this)
port = 3000

# Runtime worker threads (0 = one per CPU)
worker_threads = 0

[avatar]
# Avatar endpoint used when a profile or user is created without an image
base_url = "https://ui-avatars.com/api/"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.profile-directory/logs/service.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ErrorCode;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.avatar.base_url, "https://ui-avatars.com/api/");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_override() {
        let mut config = ServiceConfig::default();
        config.apply_overrides_from(lookup(&[
            ("PROFILE_DIR_HOST", "127.0.0.1"),
            ("PROFILE_DIR_PORT", "8080"),
            ("PROFILE_DIR_LOG_LEVEL", "debug"),
            ("PROFILE_DIR_LOG_JSON", "1"),
        ]));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_port_fallback_and_precedence() {
        let mut config = ServiceConfig::default();
        config.apply_overrides_from(lookup(&[("PORT", "4000")]));
        assert_eq!(config.server.port, 4000);

        let mut config = ServiceConfig::default();
        config.apply_overrides_from(lookup(&[("PORT", "4000"), ("PROFILE_DIR_PORT", "5000")]));
        assert_eq!(config.server.port, 5000);

        config.apply_cli_overrides(None, Some(6000));
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.bind_addr(), "0.0.0.0:6000");
    }

    #[test]
    fn test_unparseable_env_is_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_overrides_from(lookup(&[("PROFILE_DIR_PORT", "eighty")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validation_invalid_avatar_url() {
        let mut config = ServiceConfig::default();
        config.avatar.base_url = "not a url".to_string();
        assert_eq!(config.validate().unwrap_err().code(), ErrorCode::ConfigValidation);

        config.avatar.base_url = "ftp://avatars.example.com/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_port_and_host() {
        let mut config = ServiceConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.server.host = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = ServiceConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_threads_auto() {
        let mut config = ServiceConfig::default();
        assert!(config.worker_threads() >= 1);
        config.server.worker_threads = 3;
        assert_eq!(config.worker_threads(), 3);
    }

    #[test]
    fn test_default_file_round_trips() {
        let parsed: ServiceConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.avatar.base_url, DEFAULT_AVATAR_BASE);
        assert!(parsed.validate().is_ok());

        let shown = parsed.to_toml().unwrap();
        assert!(shown.contains("[server]"));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ServiceConfig = toml::from_str(
            r#"
[server]
port = 8081

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = ServiceConfig::find_config_file(Some("/nonexistent/profile-directory.toml")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);
    }
}
