use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("Deployment not found: {0}")]
    DeploymentNotFound(String),

    #[error("Job queue unavailable: {reason}")]
    QueueUnavailable { reason: String },

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Failed to load state file {path}: {reason}")]
    StateFile { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DirectorError {
    pub fn queue_unavailable(reason: impl Into<String>) -> Self {
        Self::QueueUnavailable {
            reason: reason.into(),
        }
    }

    /// Whether the failure maps to a client-visible "not found" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectorError::DeploymentNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DirectorError>;
