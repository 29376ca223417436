//! Server configuration
//!
//! Settings are read from a `jsondb.toml` file. A missing file means defaults.
//!
//! ## Environment Variables
//!
//! The following environment variables override config file settings:
//!
//! - `JSONDB_HOST` - Address to bind
//! - `JSONDB_PORT` - Port to listen on
//! - `JSONDB_DATA_FILE` - JSON file holding the collections
//! - `JSONDB_ID_FIELD` - Field used for id lookups in paths
//!
//! These can be set in a `.env` file next to the config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::DbResult;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "jsondb.toml";

/// Environment variable names
pub const ENV_HOST: &str = "JSONDB_HOST";
pub const ENV_PORT: &str = "JSONDB_PORT";
pub const ENV_DATA_FILE: &str = "JSONDB_DATA_FILE";
pub const ENV_ID_FIELD: &str = "JSONDB_ID_FIELD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// JSON file holding the collections
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Field compared when a path segment is an integer
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Allow cross-origin requests
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    57602
}

fn default_data_file() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_log_filter() -> String {
    "jsondb=info,tower_http=info".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            id_field: default_id_field(),
            log_filter: default_log_filter(),
            cors: default_cors(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// A `.env` file in the same directory is loaded first (errors ignored).
    pub fn load(path: &Path) -> DbResult<Self> {
        if let Some(dir) = path.parent() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
            }
        }

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml(content: &str) -> DbResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var(ENV_HOST) {
            if !host.is_empty() {
                self.host = host;
            }
        }

        if let Ok(port_str) = std::env::var(ENV_PORT) {
            if let Ok(port) = port_str.parse::<u16>() {
                self.port = port;
            }
        }

        if let Ok(data_file) = std::env::var(ENV_DATA_FILE) {
            if !data_file.is_empty() {
                self.data_file = PathBuf::from(data_file);
            }
        }

        if let Ok(id_field) = std::env::var(ENV_ID_FIELD) {
            if !id_field.is_empty() {
                self.id_field = id_field;
            }
        }
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 57602);
        assert_eq!(config.id_field, "id");
        assert_eq!(config.data_file, PathBuf::from("db.json"));
        assert!(config.cors);
        assert_eq!(config.bind_address(), "0.0.0.0:57602");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("port = 8080\nid_field = \"_key\"\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.id_field, "_key");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_filter, "jsondb=info,tower_http=info");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ServerConfig::from_toml("port = \"not a number\"").unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "host = \"127.0.0.1\"\ndata_file = \"users.json\"\n").unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("users.json"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.id_field, ServerConfig::default().id_field);
    }
}
