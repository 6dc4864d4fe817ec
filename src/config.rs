//! Face registry service configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::service::DEFAULT_DUPLICATE_THRESHOLD;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub recognition: RecognitionConfig,
    pub provider: ProviderConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Answer validation failures with 200 instead of 422
    pub legacy_status_codes: bool,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Json,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Euclidean distance below which a new face counts as already registered
    pub duplicate_threshold: f64,
    /// Expected embedding length; unchecked when unset
    pub embedding_dim: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Public address used to discover the outbound interface
    pub probe_addr: String,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// `MUF_CONFIG` if set, otherwise `config.toml`
    pub fn default_path() -> String {
        std::env::var("MUF_CONFIG").unwrap_or_else(|_| "config.toml".to_string())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            legacy_status_codes: false,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            path: PathBuf::from("faces_db/face_database.json"),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            embedding_dim: None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8001/encode".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_addr: "8.8.8.8:80".to_string(),
        }
    }
}
