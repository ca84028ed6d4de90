//! Application configuration.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment variables. Empty environment values count as unset.
//!
//! # Environment Variables
//! - `HALLOWEEN_CONFIG`: path to a TOML file (otherwise `halloween.toml` is searched)
//! - `HOST`, `PORT`: bind address
//! - `MAPBOX_SECRET_TOKEN`, `MAPBOX_USAGE_TOKEN_ID`: usage API credentials
//! - `MAPBOX_MONTHLY_LIMIT`, `MAPBOX_USAGE_THRESHOLD`, `MAPBOX_USAGE_OVERRIDE`
//! - `MAPBOX_API_BASE`: usage API base URL
//! - `MAPBOX_PUBLIC_TOKEN`: token handed to the browser map widget
//! - `CACHED_MAP_URL`: static image shown instead of the live map
//! - `HOUSES_PATH`: JSON file replacing the embedded house seed
//! - `VENUE_UTC_OFFSET`: venue wall-clock offset such as `+02:00`

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const CONFIG_PATH_ENV: &str = "HALLOWEEN_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "halloween.toml";
pub const DEFAULT_MAPBOX_MONTHLY_LIMIT: u64 = 50_000;
pub const DEFAULT_MAPBOX_THRESHOLD: f64 = 0.9;
pub const DEFAULT_FALLBACK_MAP_URL: &str = "/static/halloween-map-fallback.png";
pub const DEFAULT_MAPBOX_API_BASE: &str = "https://api.mapbox.com";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub venues: VenueSettings,
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Mapping provider settings, including the usage quota policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    #[serde(default)]
    pub secret_token: Option<String>,
    #[serde(default)]
    pub usage_token_id: Option<String>,
    #[serde(default = "default_monthly_limit")]
    pub monthly_limit: u64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Usage assumed when the provider reports none.
    #[serde(default)]
    pub usage_override: Option<u64>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    #[serde(default)]
    pub public_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            secret_token: None,
            usage_token_id: None,
            monthly_limit: default_monthly_limit(),
            threshold: default_threshold(),
            usage_override: None,
            api_base: default_api_base(),
            fallback_url: default_fallback_url(),
            public_token: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Where house data comes from and which clock it is listed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSettings {
    #[serde(default)]
    pub houses_path: Option<PathBuf>,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for VenueSettings {
    fn default() -> Self {
        Self {
            houses_path: None,
            utc_offset: default_utc_offset(),
        }
    }
}

impl VenueSettings {
    /// Parsed wall-clock offset of the venues.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_utc_offset(&self.utc_offset).map_err(|reason| ConfigError::InvalidValue {
            key: "venues.utc_offset".to_string(),
            value: self.utc_offset.clone(),
            reason,
        })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_monthly_limit() -> u64 {
    DEFAULT_MAPBOX_MONTHLY_LIMIT
}

fn default_threshold() -> f64 {
    DEFAULT_MAPBOX_THRESHOLD
}

fn default_api_base() -> String {
    DEFAULT_MAPBOX_API_BASE.to_string()
}

fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_MAP_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_utc_offset() -> String {
    "+02:00".to_string()
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match non_empty_var(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Search for `halloween.toml` in the current directory, `backend/`,
    /// and the parent directory.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from("backend").join(DEFAULT_CONFIG_FILE),
            PathBuf::from("..").join(DEFAULT_CONFIG_FILE),
        ];

        for path in search_paths {
            if path.exists() {
                info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Override settings from environment variables.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = non_empty_var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_var("PORT")? {
            self.server.port = port;
        }

        if let Some(token) = non_empty_var("MAPBOX_SECRET_TOKEN") {
            self.map.secret_token = Some(token);
        }
        if let Some(id) = non_empty_var("MAPBOX_USAGE_TOKEN_ID") {
            self.map.usage_token_id = Some(id);
        }
        if let Some(limit) = parse_var("MAPBOX_MONTHLY_LIMIT")? {
            self.map.monthly_limit = limit;
        }
        if let Some(threshold) = parse_var("MAPBOX_USAGE_THRESHOLD")? {
            self.map.threshold = threshold;
        }
        if let Some(usage) = parse_var("MAPBOX_USAGE_OVERRIDE")? {
            self.map.usage_override = Some(usage);
        }
        if let Some(base) = non_empty_var("MAPBOX_API_BASE") {
            self.map.api_base = base;
        }
        if let Some(token) = non_empty_var("MAPBOX_PUBLIC_TOKEN") {
            self.map.public_token = Some(token);
        }
        if let Some(url) = non_empty_var("CACHED_MAP_URL") {
            self.map.fallback_url = url;
        }

        if let Some(path) = non_empty_var("HOUSES_PATH") {
            self.venues.houses_path = Some(PathBuf::from(path));
        }
        if let Some(offset) = non_empty_var("VENUE_UTC_OFFSET") {
            self.venues.utc_offset = offset;
        }

        Ok(())
    }

    /// Reject values that would make the quota policy or clock meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.map.threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "map.threshold".to_string(),
                value: threshold.to_string(),
                reason: "must be a finite, non-negative ratio".to_string(),
            });
        }
        self.venues.offset()?;
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: Display,
{
    non_empty_var(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Parse `Z`, `UTC`, or a signed `+HH:MM` / `-HH:MM` offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    raw.parse::<FixedOffset>()
        .map_err(|e| format!("expected +HH:MM or -HH:MM ({e})"))
}
