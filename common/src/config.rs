use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const SERVER_ENV: &str = "PADRON_SERVER";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every endpoint path is joined onto (e.g. `https://padron.gob.ar/api`).
    pub server: String,

    /// Applied by the HTTP client to every request, refreshes included.
    pub timeout: Duration,

    /// 0 prints headers and summaries, 1 drops the decoration, 2 prints records only.
    pub quiet: u8,

    /// Print raw JSON instead of the formatted trees.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            quiet: 0,
            json: false,
        }
    }
}

impl Config {
    /// Resolves the server in priority order: explicit flag, environment, client file, default.
    pub fn resolve(flag: Option<String>, file: &ClientConfig) -> Self {
        let server = flag
            .or_else(|| std::env::var(SERVER_ENV).ok())
            .or_else(|| (!file.server.is_empty()).then(|| file.server.clone()))
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());

        let timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Self {
            server: server.trim_end_matches('/').to_string(),
            timeout,
            ..Self::default()
        }
    }
}

/// Persisted client settings: `~/.padron/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn default_path() -> PathBuf {
        padron_dir().join("config.toml")
    }

    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// `~/.padron`, or `./.padron` when no home directory is known.
pub fn padron_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".padron")
}
