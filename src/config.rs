//! Configuration management for Film Portfolio
//!
//! Settings come from, in increasing precedence: built-in defaults, a TOML
//! config file, the `PORTFOLIO_ORIGIN` environment variable (a `.env` file is
//! honoured), and finally CLI flags applied by the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::optimizer::parse_quality;
use crate::app::ClientConfig;
use crate::constants::{config as paths, data, env, http, images, logging, site};
use crate::errors::{AppError, ConfigError, ConfigResult, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Data client settings
    pub client: ClientConfigToml,
    /// Site presentation settings
    pub site: SiteConfig,
    /// Image optimizer settings
    pub images: ImagesConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Site origin serving `/data/`
    pub origin: String,
    /// Request timeout, e.g. `"30s"`
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Connection pool idle timeout, default `"90s"`; `"0s"` disables it
    #[serde(with = "optional_timeout")]
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
    /// Honour proxy environment variables
    pub system_proxy: bool,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            origin: data::DEFAULT_ORIGIN.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            system_proxy: true,
        }
    }
}

/// Humantime durations where zero stands for "no timeout"
mod optional_timeout {
    use std::time::Duration;

    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        humantime_serde::serialize(&value.unwrap_or(Duration::ZERO), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Duration>, D::Error> {
        let value: Duration = humantime_serde::deserialize(deserializer)?;
        Ok(Some(value).filter(|timeout| !timeout.is_zero()))
    }
}

/// Site presentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Title appended to every document title
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: site::DEFAULT_TITLE.to_string(),
        }
    }
}

/// Image optimizer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImagesConfig {
    /// Folder holding one subfolder per image set
    pub root: PathBuf,
    /// Quality used when none is given on the command line
    pub default_quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(images::DEFAULT_IMAGE_ROOT),
            default_quality: images::DEFAULT_QUALITY,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, then standard locations)
    /// 3. `PORTFOLIO_ORIGIN` environment variable
    ///
    /// CLI overrides are applied by the caller afterwards.
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound { path }.into());
            }
            Some(path) => Some(path),
            None => Self::find_config_file().await,
        };

        let mut config = match config_path {
            Some(path) => {
                debug!("Loading config from: {}", path.display());
                Self::load_from_file(&path).await?
            }
            None => Self::default(),
        };

        config.apply_origin_override(std::env::var(env::ORIGIN).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the configured origin when `origin` is present and non-empty
    pub fn apply_origin_override(&mut self, origin: Option<String>) {
        if let Some(origin) = origin.filter(|o| !o.trim().is_empty()) {
            debug!("Origin overridden: {}", origin);
            self.client.origin = origin.trim().to_string();
        }
    }

    /// Check values that parse but cannot be used
    pub fn validate(&self) -> ConfigResult<()> {
        let quality = self.images.default_quality.to_string();
        parse_quality(&quality).map_err(|_| ConfigError::InvalidValue {
            field: "images.default_quality".to_string(),
            value: quality.clone(),
            reason: format!(
                "Must be between {} and {}",
                images::MIN_QUALITY,
                images::MAX_QUALITY
            ),
        })?;

        if self.client.pool_max_per_host == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.pool_max_per_host".to_string(),
                value: "0".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Convert TOML-friendly configuration to the runtime client configuration
    pub fn to_runtime_config(&self) -> ClientConfig {
        self.client.to_runtime_config()
    }

    /// Find configuration file in standard locations
    async fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(paths::LOCAL_FILE)];
        if let Some(user_config) = Self::default_config_path() {
            search_paths.push(user_config);
        }

        for path in search_paths {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Config file path under the user config directory, if there is one
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(paths::APP_DIR).join(paths::FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|source| ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::generic(format!("Failed to render config: {}", e)))
    }

    /// Default configuration content with comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Film Portfolio Configuration
# Every setting is optional; missing values fall back to these defaults.

[client]
# Site origin serving the /data/ folder (PORTFOLIO_ORIGIN overrides this)
origin = "{origin}"
request_timeout = "{request_timeout}"
connect_timeout = "{connect_timeout}"
pool_idle_timeout = "{pool_idle_timeout}"
pool_max_per_host = {pool_max_per_host}
system_proxy = true

[site]
title = "{title}"

[images]
# Folder holding one subfolder per image set
root = "{image_root}"
default_quality = {quality}

[logging]
level = "{level}"  # error, warn, info, debug, trace
"#,
            origin = data::DEFAULT_ORIGIN,
            request_timeout = format!("{}s", http::DEFAULT_TIMEOUT.as_secs()),
            connect_timeout = format!("{}s", http::CONNECT_TIMEOUT.as_secs()),
            pool_idle_timeout = format!("{}s", http::POOL_IDLE_TIMEOUT.as_secs()),
            pool_max_per_host = http::POOL_MAX_PER_HOST,
            title = site::DEFAULT_TITLE,
            image_root = images::DEFAULT_IMAGE_ROOT,
            quality = images::DEFAULT_QUALITY,
            level = logging::DEFAULT_LOG_LEVEL,
        )
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            origin: self.origin.clone(),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            pool_idle_timeout: self.pool_idle_timeout,
            pool_max_per_host: self.pool_max_per_host,
            system_proxy: self.system_proxy,
        }
    }
}
