use crate::deploy::{DirectorError, Result};
use crate::queue::JobQueue;
use crate::types::{JobSubmission, JobType, TaskHandle};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// In-process queue that records submissions instead of running them
#[derive(Debug)]
pub struct MemoryJobQueue {
    next_id: AtomicU64,
    closed: AtomicBool,
    submissions: Mutex<Vec<(TaskHandle, JobSubmission)>>,
}

impl Default for MemoryJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryJobQueue {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            submissions: Mutex::new(Vec::new()),
        }
    }

    /// Stop accepting submissions.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Accepted submissions in the order they were recorded.
    pub fn submissions(&self) -> Vec<JobSubmission> {
        self.lock()
            .iter()
            .map(|(_, submission)| submission.clone())
            .collect()
    }

    pub fn tasks(&self) -> Vec<TaskHandle> {
        self.lock().iter().map(|(task, _)| task.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(TaskHandle, JobSubmission)>> {
        self.submissions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(
        &self,
        user: &str,
        job_type: JobType,
        description: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<TaskHandle> {
        if self.is_closed() {
            return Err(DirectorError::queue_unavailable("queue is closed"));
        }

        let submission = JobSubmission {
            user: user.to_string(),
            job_type,
            description: description.to_string(),
            args,
        };

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let task = TaskHandle::queued(id, &submission);
        debug!("Recorded {} submission as task {}", job_type, id);

        self.lock().push((task.clone(), submission));
        info!("Task {} queued: {}", id, description);
        Ok(task)
    }
}
