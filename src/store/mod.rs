//! Read access to persisted deployments and their instances.

pub mod lookup;
pub mod memory;

pub use lookup::DeploymentLookup;
pub use memory::{MemoryRepository, RepositoryState};

use crate::deploy::Result;
use crate::types::{Deployment, DeploymentId, Instance};
use async_trait::async_trait;

/// Data-store capability injected into the deployment manager.
///
/// Both queries are unsynchronized snapshot reads; a record returned here may
/// already be stale by the time the caller acts on it.
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    /// Exact-match lookup by unique deployment name.
    ///
    /// Returns `None` when no deployment carries that name.
    async fn resolve_by_name(&self, name: &str) -> Result<Option<Deployment>>;

    /// All instances belonging to a deployment, in the store's natural order.
    async fn query_instances_by_deployment(
        &self,
        deployment_id: DeploymentId,
    ) -> Result<Vec<Instance>>;
}
