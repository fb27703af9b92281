use crate::error::{Result, TodoError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "config.json";
const DATA_FILENAME: &str = "db.json";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_PATH: &str = "/api/v1";
const DEFAULT_CACHE_TTL_SECS: u64 = 120;
const DEFAULT_LOG_FILTER: &str = "info";

/// Server configuration, optionally read from a `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,

    pub port: u16,

    /// The JSON document holding every todo
    pub data_file: PathBuf,

    /// Prefix all routes are mounted under (e.g. "/api/v1")
    pub base_path: String,

    /// How long a cached list response stays fresh; 0 disables the cache
    pub cache_ttl_secs: u64,

    /// Used when RUST_LOG is not set
    pub log_filter: String,
}

fn default_data_file() -> PathBuf {
    ProjectDirs::from("com", "todos", "todos")
        .map(|dirs| dirs.data_dir().join(DATA_FILENAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILENAME))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_file: default_data_file(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load config from the given file, or return defaults if it does not exist
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(TodoError::Io)?;
        let mut config: ServerConfig =
            serde_json::from_str(&content).map_err(TodoError::Serialization)?;
        let base_path = config.base_path.clone();
        config.set_base_path(&base_path);
        Ok(config)
    }

    /// Save config to the given file
    pub fn save<P: AsRef<Path>>(&self, config_path: P) -> Result<()> {
        let config_path = config_path.as_ref();

        if let Some(dir) = config_path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(TodoError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Set the base path (normalizes to a leading slash and no trailing slash)
    pub fn set_base_path(&mut self, path: &str) {
        let trimmed = path.trim().trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
    }
}
