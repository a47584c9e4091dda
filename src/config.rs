use crate::deploy::{DirectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration of the deployment director
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorConfig {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueBackend {
    /// Record submissions in-process; nothing executes them
    #[default]
    Memory,
    /// Submit to a remote task service over HTTP
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default)]
    pub backend: QueueBackend,
    #[serde(default = "default_queue_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            backend: QueueBackend::default(),
            url: default_queue_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// YAML or JSON snapshot of deployments and instances
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

fn default_queue_url() -> String {
    "http://127.0.0.1:25555".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl DirectorConfig {
    /// `$XDG_CONFIG_HOME/deployment-director/config.yml` or the platform
    /// equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deployment-director").join("config.yml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            DirectorError::Configuration(format!("Invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default location when it exists,
    /// else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue.timeout_secs == 0 {
            return Err(DirectorError::Configuration(
                "queue.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.queue.backend == QueueBackend::Http {
            url::Url::parse(&self.queue.url).map_err(|e| {
                DirectorError::Configuration(format!("Invalid queue.url {}: {e}", self.queue.url))
            })?;
        }
        Ok(())
    }
}
