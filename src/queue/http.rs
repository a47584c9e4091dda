//! HTTP client for a remote task-submission service.

use crate::config::QueueConfig;
use crate::deploy::{DirectorError, Result};
use crate::queue::JobQueue;
use crate::types::{JobSubmission, JobType, TaskHandle};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Submits jobs with `POST {base_url}/tasks`.
///
/// Every request is bounded by the configured timeout; any failure to get an
/// accepted task back is reported as [`DirectorError::QueueUnavailable`].
#[derive(Debug, Clone)]
pub struct HttpJobQueue {
    client: Client,
    base_url: String,
}

impl HttpJobQueue {
    pub fn new(config: &QueueConfig) -> Result<Self> {
        Self::with_timeout(&config.url, Duration::from_secs(config.timeout_secs))
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|e| DirectorError::Configuration(format!("Invalid queue URL {url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DirectorError::Configuration(format!(
                "Unsupported queue URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deployment-director/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DirectorError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    pub fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }
}

#[async_trait]
impl JobQueue for HttpJobQueue {
    async fn enqueue(
        &self,
        user: &str,
        job_type: JobType,
        description: &str,
        args: Vec<serde_json::Value>,
    ) -> Result<TaskHandle> {
        let submission = JobSubmission {
            user: user.to_string(),
            job_type,
            description: description.to_string(),
            args,
        };

        let url = self.tasks_url();
        debug!("Submitting {} job to {}", job_type, url);

        let response = self
            .client
            .post(&url)
            .json(&submission)
            .send()
            .await
            .map_err(|e| {
                warn!("Task submission to {} failed: {}", url, e);
                DirectorError::queue_unavailable(e.to_string())
            })?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => {
                let task: TaskHandle = response.json().await.map_err(|e| {
                    DirectorError::queue_unavailable(format!("malformed task response: {e}"))
                })?;
                info!("Task {} queued: {}", task.id, task.description);
                Ok(task)
            }
            status => Err(DirectorError::queue_unavailable(format!(
                "task submission rejected with status {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buffer.len() >= header_end + 4 + content_length {
                    return text[header_end + 4..].to_string();
                }
            }
        }
        String::new()
    }

    /// Serves a single request with the given status and body, returning the
    /// request body it received.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request_body = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request_body
        });

        (format!("http://{address}"), handle)
    }

    #[test]
    fn test_rejects_invalid_url() {
        let result = HttpJobQueue::with_timeout("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(DirectorError::Configuration(_))));

        let result = HttpJobQueue::with_timeout("ftp://tasks.local", Duration::from_secs(1));
        assert!(matches!(result, Err(DirectorError::Configuration(_))));
    }

    #[test]
    fn test_tasks_url_strips_trailing_slash() {
        let queue = HttpJobQueue::with_timeout("http://director:25555/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(queue.tasks_url(), "http://director:25555/tasks");
    }

    #[tokio::test]
    async fn test_enqueue_posts_submission_and_decodes_task() {
        let task = json!({
            "id": 42,
            "state": "queued",
            "description": "create deployment",
            "user": "admin",
            "timestamp": "2024-01-01T00:00:00Z"
        });
        let (url, server) = serve_once("201 Created", task.to_string()).await;

        let queue = HttpJobQueue::with_timeout(&url, Duration::from_secs(5)).unwrap();
        let handle = queue
            .enqueue(
                "admin",
                JobType::UpdateDeployment,
                "create deployment",
                vec![json!("/tmp/m.yml"), json!(null), json!(null), json!({})],
            )
            .await
            .unwrap();
        assert_eq!(handle.id, 42);

        let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(sent["type"], "update_deployment");
        assert_eq!(sent["args"], json!(["/tmp/m.yml", null, null, {}]));
    }

    #[tokio::test]
    async fn test_server_error_is_queue_unavailable() {
        let (url, _server) = serve_once("503 Service Unavailable", "{}".to_string()).await;

        let queue = HttpJobQueue::with_timeout(&url, Duration::from_secs(5)).unwrap();
        let result = queue
            .enqueue("admin", JobType::DeleteDeployment, "delete deployment x", vec![])
            .await;
        match result {
            Err(DirectorError::QueueUnavailable { reason }) => assert!(reason.contains("503")),
            other => panic!("Expected QueueUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_queue_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let queue =
            HttpJobQueue::with_timeout(&format!("http://{address}"), Duration::from_secs(2)).unwrap();
        let result = queue
            .enqueue("admin", JobType::UpdateDeployment, "create deployment", vec![])
            .await;
        assert!(matches!(result, Err(DirectorError::QueueUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_unresponsive_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let queue = HttpJobQueue::with_timeout(
            &format!("http://{address}"),
            Duration::from_millis(200),
        )
        .unwrap();
        let result = queue
            .enqueue("admin", JobType::UpdateDeployment, "create deployment", vec![])
            .await;
        assert!(matches!(result, Err(DirectorError::QueueUnavailable { .. })));
    }
}
