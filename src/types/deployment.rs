use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate key of a persisted deployment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(pub i64);

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted deployment record
///
/// The manifest is kept exactly as uploaded; nothing in this crate parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub name: String,
    pub manifest: String,
    #[serde(default)]
    pub cloud_config_id: Option<i64>,
    #[serde(default)]
    pub runtime_config_id: Option<i64>,
}

impl Deployment {
    pub fn new(id: i64, name: impl Into<String>, manifest: impl Into<String>) -> Self {
        Self {
            id: DeploymentId(id),
            name: name.into(),
            manifest: manifest.into(),
            cloud_config_id: None,
            runtime_config_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudConfig {
    pub id: i64,
    pub properties: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub id: i64,
    pub properties: String,
    pub created_at: DateTime<Utc>,
}

impl CloudConfig {
    pub fn new(id: i64, properties: impl Into<String>) -> Self {
        Self {
            id,
            properties: properties.into(),
            created_at: Utc::now(),
        }
    }
}

impl RuntimeConfig {
    pub fn new(id: i64, properties: impl Into<String>) -> Self {
        Self {
            id,
            properties: properties.into(),
            created_at: Utc::now(),
        }
    }
}

/// Serialized form of a deployment returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestView {
    pub manifest: String,
}
