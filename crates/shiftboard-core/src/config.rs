use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_ROLE;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (shiftboard.toml + SHIFTBOARD_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShiftboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub volunteers: VolunteersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Where the planner sends its REST calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteersConfig {
    /// Role given to volunteers created by one-click registration.
    #[serde(default = "default_role")]
    pub default_role: String,
}

impl Default for VolunteersConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_base_url() -> String {
    format!("http://{}:{}", DEFAULT_BIND, DEFAULT_PORT)
}
fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.shiftboard/shiftboard.db", home)
}

impl ShiftboardConfig {
    /// Load config from a TOML file with SHIFTBOARD_* env var overrides.
    ///
    /// Path resolution: explicit argument, then `~/.shiftboard/shiftboard.toml`.
    /// A missing file is not an error: it is logged and every field keeps
    /// its default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        if std::path::Path::new(&path).exists() {
            tracing::debug!(path = %path, "loading config");
        } else {
            tracing::warn!(path = %path, "config file not found, using defaults");
        }
        Self::figment(&path)
            .extract()
            .map_err(|e| crate::error::ShiftboardError::Config(e.to_string()))
    }

    fn figment(path: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("SHIFTBOARD_").split("__"))
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.shiftboard/shiftboard.toml", home)
}
