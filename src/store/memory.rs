use crate::deploy::{DirectorError, Result};
use crate::store::DeploymentRepository;
use crate::types::{Deployment, DeploymentId, Instance};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Serialized contents of a repository state file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryState {
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// In-process repository backed by a state snapshot.
///
/// Instances are kept in insertion order and returned in that order.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<RepositoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: RepositoryState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Load a state file, parsed as JSON for `.json` and YAML otherwise.
    pub async fn load(path: &Path) -> Result<Self> {
        info!("Loading repository state from {}", path.display());

        let content = tokio::fs::read_to_string(path).await?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let state: RepositoryState = if is_json {
            serde_json::from_str(&content).map_err(|e| DirectorError::StateFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| DirectorError::StateFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        debug!(
            "Loaded {} deployments and {} instances",
            state.deployments.len(),
            state.instances.len()
        );
        Ok(Self::from_state(state))
    }

    /// Insert a deployment, replacing any record with the same name.
    pub fn insert_deployment(&self, deployment: Deployment) {
        let mut state = self.write();
        state.deployments.retain(|d| d.name != deployment.name);
        state.deployments.push(deployment);
    }

    pub fn insert_instance(&self, instance: Instance) {
        self.write().instances.push(instance);
    }

    pub fn remove_deployment(&self, name: &str) -> Option<Deployment> {
        let mut state = self.write();
        let position = state.deployments.iter().position(|d| d.name == name)?;
        let removed = state.deployments.remove(position);
        state.instances.retain(|i| i.deployment_id != removed.id);
        Some(removed)
    }

    pub fn snapshot(&self) -> RepositoryState {
        self.read().clone()
    }

    // A poisoned lock still guards consistent data: every writer above
    // completes its mutation before releasing the guard.
    fn read(&self) -> RwLockReadGuard<'_, RepositoryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RepositoryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DeploymentRepository for MemoryRepository {
    async fn resolve_by_name(&self, name: &str) -> Result<Option<Deployment>> {
        Ok(self
            .read()
            .deployments
            .iter()
            .find(|d| d.name == name)
            .cloned())
    }

    async fn query_instances_by_deployment(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<Vec<Instance>> {
        Ok(self
            .read()
            .instances
            .iter()
            .filter(|i| i.deployment_id == deployment_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VmCid;
    use std::io::Write;

    fn instance(deployment_id: i64, uuid: &str) -> Instance {
        Instance {
            deployment_id: DeploymentId(deployment_id),
            agent_id: format!("agent-{uuid}"),
            vm_cid: Some(VmCid::new(format!("vm-{uuid}"))),
            job: "worker".to_string(),
            index: 0,
            uuid: uuid.to_string(),
        }
    }

    #[tokio::test]
    async fn test_instances_scoped_to_deployment_in_insertion_order() {
        let repository = MemoryRepository::new();
        repository.insert_instance(instance(1, "c"));
        repository.insert_instance(instance(2, "x"));
        repository.insert_instance(instance(1, "a"));

        let uuids: Vec<_> = repository
            .query_instances_by_deployment(DeploymentId(1))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.uuid)
            .collect();
        assert_eq!(uuids, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_insert_replaces_same_name() {
        let repository = MemoryRepository::new();
        repository.insert_deployment(Deployment::new(1, "cf", "v1"));
        repository.insert_deployment(Deployment::new(2, "cf", "v2"));

        let found = repository.resolve_by_name("cf").await.unwrap().unwrap();
        assert_eq!(found.id, DeploymentId(2));
        assert_eq!(repository.snapshot().deployments.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_deployment_drops_its_instances() {
        let repository = MemoryRepository::new();
        repository.insert_deployment(Deployment::new(1, "cf", ""));
        repository.insert_instance(instance(1, "a"));

        assert!(repository.remove_deployment("cf").is_some());
        assert!(repository.resolve_by_name("cf").await.unwrap().is_none());
        assert!(repository
            .query_instances_by_deployment(DeploymentId(1))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_load_yaml_state_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            r#"
deployments:
  - id: 7
    name: redis
    manifest: "name: redis\n"
    cloud_config_id: 3
instances:
  - deployment_id: 7
    agent_id: a1
    vm_cid: vm-1
    job: redis
    index: 0
    uuid: u1
  - deployment_id: 7
    agent_id: a2
    job: redis
    index: 1
    uuid: u2
"#
        )
        .unwrap();

        let repository = MemoryRepository::load(file.path()).await.unwrap();
        let redis = repository.resolve_by_name("redis").await.unwrap().unwrap();
        assert_eq!(redis.manifest, "name: redis\n");
        assert_eq!(redis.cloud_config_id, Some(3));
        assert_eq!(redis.runtime_config_id, None);

        let instances = repository
            .query_instances_by_deployment(redis.id)
            .await
            .unwrap();
        assert_eq!(instances.len(), 2);
        assert!(instances[1].vm_cid.is_none());
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"deployments\": [{{\"name\": 1}}]}}").unwrap();

        let result = MemoryRepository::load(file.path()).await;
        assert!(matches!(result, Err(DirectorError::StateFile { .. })));
    }
}
