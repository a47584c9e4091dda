//! Submission of asynchronous tasks to an external execution engine.

pub mod http;
pub mod memory;

pub use http::HttpJobQueue;
pub use memory::MemoryJobQueue;

use crate::deploy::Result;
use crate::types::{JobType, TaskHandle};
use async_trait::async_trait;

/// Accepts job submissions and hands back a task handle without waiting for
/// the job to run.
///
/// Implementations must tolerate concurrent callers; task id assignment and
/// durability of accepted submissions are their responsibility.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(
        &self,
        user: &str,
        job_type: JobType,
        description: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<TaskHandle>;
}
