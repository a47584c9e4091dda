use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options forwarded untouched to the job that executes a submission
pub type JobOptions = serde_json::Map<String, serde_json::Value>;

/// Kind of work a submitted task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    UpdateDeployment,
    DeleteDeployment,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::UpdateDeployment => write!(f, "update_deployment"),
            JobType::DeleteDeployment => write!(f, "delete_deployment"),
        }
    }
}

/// A request for asynchronous work, as handed to a job queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub user: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub description: String,
    pub args: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Queued,
    Processing,
    Done,
    Error,
    Cancelled,
}

/// Handle to a task accepted by the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub id: u64,
    pub state: TaskState,
    pub description: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
}

impl TaskHandle {
    pub fn queued(id: u64, submission: &JobSubmission) -> Self {
        Self {
            id,
            state: TaskState::Queued,
            description: submission.description.clone(),
            user: submission.user.clone(),
            timestamp: Utc::now(),
        }
    }
}
