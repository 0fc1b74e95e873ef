use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where the session (client side) and the identity store (server side)
/// are persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_identity_file")]
    pub identity_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_file: default_session_file(),
            identity_file: default_identity_file(),
        }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_session_file() -> String { "session.json".into() }
fn default_identity_file() -> String { "identities.json".into() }

impl StorageConfig {
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(&self.session_file)
    }

    pub fn identity_path(&self) -> PathBuf {
        self.data_dir.join(&self.identity_file)
    }
}

/// Knobs for the simulated backend.
#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    /// Multiplier applied to the default simulated latency; `0` disables delays.
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
    /// Fixed RNG seed for reproducible scores; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self { latency_scale: default_latency_scale(), seed: None }
    }
}

fn default_latency_scale() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

fn default_base_url() -> String { "http://127.0.0.1:8080".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like [`AppConfig::load_and_validate`] but a missing file yields defaults.
    pub fn load_or_default() -> Result<Self> {
        if std::path::Path::new(&config_path()).exists() {
            return Self::load_and_validate();
        }
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.mock.validate()?;
        self.client.normalize_from_env();
        self.client.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.session_file.trim().is_empty() || self.identity_file.trim().is_empty() {
            return Err(anyhow!("storage.session_file and storage.identity_file must not be empty"));
        }
        Ok(())
    }
}

impl MockConfig {
    fn validate(&self) -> Result<()> {
        if !self.latency_scale.is_finite() || self.latency_scale < 0.0 {
            return Err(anyhow!("mock.latency_scale must be a non-negative number"));
        }
        Ok(())
    }
}

impl ClientConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("RESUME_BOOST_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
    }

    fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("client.base_url must start with http:// or https://"));
        }
        Ok(())
    }
}
