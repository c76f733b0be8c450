//! Configuration schema definitions
//!
//! Every section is optional in the TOML file and falls back to defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Community record storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Coastline shard loading and probing
    #[serde(default)]
    pub coastline: CoastlineConfig,

    /// Community wizard limits
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Apply `FIFTHWORLD_*` overrides using the given variable lookup.
    ///
    /// Unparseable numeric overrides are reported rather than ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("FIFTHWORLD_BIND") {
            self.server.bind = bind;
        }
        if let Some(path) = lookup("FIFTHWORLD_DATABASE") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(source) = lookup("FIFTHWORLD_COASTLINE_SOURCE") {
            self.coastline.source = source;
        }
        if let Some(mode) = lookup("FIFTHWORLD_COASTLINE_MODE") {
            self.coastline.mode = match mode.to_lowercase().as_str() {
                "index" => CoastlineMode::Index,
                "scan" => CoastlineMode::Scan,
                other => {
                    return Err(Error::invalid_config(
                        "FIFTHWORLD_COASTLINE_MODE",
                        format!("expected \"index\" or \"scan\", got \"{other}\""),
                    ));
                }
            };
        }
        if let Some(radius) = lookup("FIFTHWORLD_WALKING_RADIUS_KM") {
            self.wizard.walking_radius_km = radius.parse().map_err(|_| {
                Error::invalid_config(
                    "FIFTHWORLD_WALKING_RADIUS_KM",
                    format!("\"{radius}\" is not a number"),
                )
            })?;
        }
        if let Some(level) = lookup("FIFTHWORLD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("FIFTHWORLD_LOG_JSON") {
            self.logging.json = matches!(json.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Reject values the services cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(Error::invalid_config("server.bind", "must not be empty"));
        }
        if self.coastline.shard_count == 0 {
            return Err(Error::invalid_config("coastline.shard_count", "must be at least 1"));
        }
        if self.coastline.circle_points < 3 {
            return Err(Error::invalid_config("coastline.circle_points", "must be at least 3"));
        }
        if !(self.coastline.radius_km.is_finite() && self.coastline.radius_km > 0.0) {
            return Err(Error::invalid_config("coastline.radius_km", "must be positive"));
        }
        if self.wizard.max_specialties == 0 {
            return Err(Error::invalid_config("wizard.max_specialties", "must be at least 1"));
        }
        if !(self.wizard.walking_radius_km.is_finite() && self.wizard.walking_radius_km > 0.0) {
            return Err(Error::invalid_config("wizard.walking_radius_km", "must be positive"));
        }
        Ok(())
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the database file, created if missing
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("fifthworld.db")
}

/// How coastline intersection is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoastlineMode {
    /// Load all shards once and query an R-tree
    #[default]
    Index,
    /// Fetch and scan every shard on each check
    Scan,
}

/// Coastline data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoastlineConfig {
    /// Base URL (`http://`, `https://`) or local directory holding the shards
    #[serde(default = "default_coastline_source")]
    pub source: String,

    /// Number of numbered shard files
    #[serde(default = "default_shard_count")]
    pub shard_count: u32,

    /// Probe strategy
    #[serde(default)]
    pub mode: CoastlineMode,

    /// Radius of the circle tested against the coastline
    #[serde(default = "default_walking_radius_km")]
    pub radius_km: f64,

    /// Vertex count of the circle polygon
    #[serde(default = "default_circle_points")]
    pub circle_points: usize,
}

impl Default for CoastlineConfig {
    fn default() -> Self {
        Self {
            source: default_coastline_source(),
            shard_count: default_shard_count(),
            mode: CoastlineMode::default(),
            radius_km: default_walking_radius_km(),
            circle_points: default_circle_points(),
        }
    }
}

fn default_coastline_source() -> String {
    "data/coastline".to_string()
}

fn default_shard_count() -> u32 {
    54
}

fn default_walking_radius_km() -> f64 {
    45.0
}

fn default_circle_points() -> usize {
    10
}

/// Wizard limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Maximum number of specialties a community may choose
    #[serde(default = "default_max_specialties")]
    pub max_specialties: usize,

    /// Maximum distance of a place from the territory center
    #[serde(default = "default_walking_radius_km")]
    pub walking_radius_km: f64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_specialties: default_max_specialties(),
            walking_radius_km: default_walking_radius_km(),
        }
    }
}

fn default_max_specialties() -> usize {
    4
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
