//! Server configuration loaded from TOML, with CLI overrides applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::catalog::index::{DEFAULT_WRITER_BUFFER_BYTES, MIN_WRITER_BUFFER_BYTES};

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the tantivy index
    pub index_dir: PathBuf,
    /// JSON course list loaded on startup when `reindex_on_start` is set
    pub seed_file: Option<PathBuf>,
    pub reindex_on_start: bool,
    pub log_level: String,
    pub writer_buffer_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            index_dir: default_index_dir(),
            seed_file: None,
            reindex_on_start: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            writer_buffer_bytes: DEFAULT_WRITER_BUFFER_BYTES,
        }
    }
}

/// `~/.course-search/index`, or a relative path when there is no home directory
pub fn default_index_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".course-search")
        .join("index")
}

impl ServerConfig {
    /// Read a TOML config file; keys it omits keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML config")
    }

    /// Defaults, or the given file when one is set
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("Port cannot be zero");
        }

        if self.host.trim().is_empty() {
            bail!("Host cannot be empty");
        }

        if self.writer_buffer_bytes < MIN_WRITER_BUFFER_BYTES {
            bail!(
                "Writer buffer of {} bytes is below the {} byte minimum",
                self.writer_buffer_bytes,
                MIN_WRITER_BUFFER_BYTES
            );
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            bail!(
                "Invalid log level: {}. Must be one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }
}
