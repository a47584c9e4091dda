use crate::deploy::Result;
use crate::queue::JobQueue;
use crate::store::{DeploymentLookup, DeploymentRepository};
use crate::types::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// API-facing entry point for the deployment lifecycle.
///
/// Reads go straight to the repository; mutations are submitted as tasks and
/// executed elsewhere. The manager holds no mutable state of its own and
/// never retries: every collaborator error is returned unchanged.
#[derive(Clone)]
pub struct DeploymentManager {
    repository: Arc<dyn DeploymentRepository>,
    lookup: DeploymentLookup,
    queue: Arc<dyn JobQueue>,
}

impl DeploymentManager {
    pub fn new(repository: Arc<dyn DeploymentRepository>, queue: Arc<dyn JobQueue>) -> Self {
        let lookup = DeploymentLookup::new(repository.clone());

        Self {
            repository,
            lookup,
            queue,
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Deployment> {
        self.lookup.resolve(name).await
    }

    /// Submit an update job that creates (or updates) the deployment described
    /// by the manifest at `manifest_path`.
    pub async fn create_deployment(
        &self,
        user: &str,
        manifest_path: &str,
        cloud_config: Option<&CloudConfig>,
        runtime_config: Option<&RuntimeConfig>,
        options: JobOptions,
    ) -> Result<TaskHandle> {
        let cloud_config_id = cloud_config.map(|config| config.id);
        let runtime_config_id = runtime_config.map(|config| config.id);

        info!("Submitting create deployment for {}", manifest_path);
        debug!(
            "cloud_config_id={:?} runtime_config_id={:?}",
            cloud_config_id, runtime_config_id
        );

        let args = vec![
            Value::from(manifest_path),
            Value::from(cloud_config_id),
            Value::from(runtime_config_id),
            Value::Object(options),
        ];

        self.queue
            .enqueue(user, JobType::UpdateDeployment, "create deployment", args)
            .await
    }

    pub async fn delete_deployment(
        &self,
        user: &str,
        deployment: &Deployment,
        options: JobOptions,
    ) -> Result<TaskHandle> {
        info!("Submitting delete deployment for {}", deployment.name);

        let description = format!("delete deployment {}", deployment.name);
        let args = vec![Value::from(deployment.name.as_str()), Value::Object(options)];

        self.queue
            .enqueue(user, JobType::DeleteDeployment, &description, args)
            .await
    }

    pub fn manifest_view(&self, deployment: &Deployment) -> ManifestView {
        ManifestView {
            manifest: deployment.manifest.clone(),
        }
    }

    /// `{"manifest": ...}` with the manifest passed through verbatim
    pub fn deployment_to_json(&self, deployment: &Deployment) -> Result<String> {
        Ok(serde_json::to_string(&self.manifest_view(deployment))?)
    }

    /// Summaries of the deployment's provisioned instances, in the order the
    /// repository returned them.
    pub async fn instance_summaries(&self, deployment: &Deployment) -> Result<Vec<InstanceSummary>> {
        let instances = self
            .repository
            .query_instances_by_deployment(deployment.id)
            .await?;

        let total = instances.len();
        let summaries: Vec<_> = instances.iter().filter_map(Instance::summary).collect();
        debug!(
            "Deployment {} has {} instances, {} with a VM",
            deployment.name,
            total,
            summaries.len()
        );

        Ok(summaries)
    }

    pub async fn deployment_instances_to_json(&self, deployment: &Deployment) -> Result<String> {
        let summaries = self.instance_summaries(deployment).await?;
        Ok(serde_json::to_string(&summaries)?)
    }
}
