use crate::deploy::{DirectorError, Result};
use crate::store::DeploymentRepository;
use crate::types::Deployment;
use std::sync::Arc;
use tracing::debug;

/// Resolves deployment names to persisted records
#[derive(Clone)]
pub struct DeploymentLookup {
    repository: Arc<dyn DeploymentRepository>,
}

impl DeploymentLookup {
    pub fn new(repository: Arc<dyn DeploymentRepository>) -> Self {
        Self { repository }
    }

    pub async fn resolve(&self, name: &str) -> Result<Deployment> {
        debug!("Resolving deployment: {}", name);

        self.repository
            .resolve_by_name(name)
            .await?
            .ok_or_else(|| DirectorError::DeploymentNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRepository;

    #[tokio::test]
    async fn test_resolve_exact_name_only() {
        let repository = MemoryRepository::new();
        repository.insert_deployment(Deployment::new(1, "cf", "name: cf\n"));
        let lookup = DeploymentLookup::new(Arc::new(repository));

        assert_eq!(lookup.resolve("cf").await.unwrap().name, "cf");

        match lookup.resolve("CF").await {
            Err(DirectorError::DeploymentNotFound(name)) => assert_eq!(name, "CF"),
            other => panic!("Expected DeploymentNotFound, got {other:?}"),
        }
    }
}
