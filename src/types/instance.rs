use crate::types::deployment::DeploymentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cloud provider identifier of a provisioned VM
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VmCid(String);

impl VmCid {
    pub fn new(cid: impl Into<String>) -> Self {
        Self(cid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VmCid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One member of a deployment's job group
///
/// `vm_cid` is `None` until the VM backing the instance has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub deployment_id: DeploymentId,
    pub agent_id: String,
    #[serde(default)]
    pub vm_cid: Option<VmCid>,
    pub job: String,
    pub index: u32,
    pub uuid: String,
}

impl Instance {
    pub fn is_provisioned(&self) -> bool {
        self.vm_cid.is_some()
    }

    /// Summary of a provisioned instance, `None` when no VM exists yet.
    pub fn summary(&self) -> Option<InstanceSummary> {
        let cid = self.vm_cid.clone()?;
        Some(InstanceSummary {
            agent_id: self.agent_id.clone(),
            cid,
            job: self.job.clone(),
            index: self.index,
            id: self.uuid.clone(),
        })
    }
}

/// Client-facing entry of the instance inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub agent_id: String,
    pub cid: VmCid,
    pub job: String,
    pub index: u32,
    pub id: String,
}
