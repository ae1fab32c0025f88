//! Where task status comes from.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::PollError;

/// Runtime block of a task status response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRuntime {
    pub done: bool,
    #[serde(default)]
    pub exception: Option<String>,
    /// Backend-specific progress label, e.g. "PENDING" or "RUNNING"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_traceback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl TaskRuntime {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn succeeded() -> Self {
        Self {
            done: true,
            ..Self::default()
        }
    }

    pub fn failed(exception: &str) -> Self {
        Self {
            done: true,
            exception: Some(exception.to_string()),
            ..Self::default()
        }
    }

    /// The reported exception, ignoring blank strings.
    pub fn exception_message(&self) -> Option<&str> {
        self.exception
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

/// Status of one async task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncTaskStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub runtime: TaskRuntime,
}

/// The backend's `{ code, msg, data }` response wrapper.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<AsyncTaskStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusBody {
    Wrapped(Envelope),
    Bare(AsyncTaskStatus),
}

/// The `msg` of an error envelope, if the body is one and the message is non-blank.
fn envelope_message(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope>(body)
        .ok()
        .map(|envelope| envelope.msg)
        .filter(|msg| !msg.trim().is_empty())
}

/// Parse a status response body, accepting both the envelope and the bare form.
pub fn parse_status_body(body: &str) -> Result<AsyncTaskStatus, PollError> {
    let parsed: StatusBody = serde_json::from_str(body)
        .map_err(|e| PollError::transport(format!("Invalid task status response: {}", e)))?;

    match parsed {
        StatusBody::Bare(status) => Ok(status),
        StatusBody::Wrapped(envelope) if envelope.code != 0 => Err(PollError::transport(envelope.msg)),
        StatusBody::Wrapped(envelope) => envelope
            .data
            .ok_or_else(|| PollError::transport("Task status response has no data")),
    }
}

/// Fetches the current status of a task. May fail; failures are terminal for
/// the poll session that observes them.
#[async_trait]
pub trait TaskStatusSource: Send + Sync {
    async fn get_async_task_status(&self, task_id: i64) -> Result<AsyncTaskStatus, PollError>;
}

/// [`TaskStatusSource`] backed by the management backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskStatusClient {
    client: reqwest::Client,
    base_url: String,
    path_template: String,
    token: Option<String>,
}

/// Builder for [`HttpTaskStatusClient`].
#[derive(Debug, Clone)]
pub struct HttpTaskStatusClientBuilder {
    base_url: String,
    path_template: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpTaskStatusClientBuilder {
    /// Override the endpoint path; `{id}` is replaced with the task id.
    pub fn path_template(mut self, template: &str) -> Self {
        self.path_template = template.to_string();
        self
    }

    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> anyhow::Result<HttpTaskStatusClient> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(HttpTaskStatusClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            path_template: self.path_template,
            token: self.token,
        })
    }
}

impl HttpTaskStatusClient {
    pub fn builder(base_url: &str) -> HttpTaskStatusClientBuilder {
        HttpTaskStatusClientBuilder {
            base_url: base_url.to_string(),
            path_template: "/api/v1/system/tasks/{id}".to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Client configured from the layered console configuration.
    pub fn from_config(config: &crate::config::BotdeckConfig) -> anyhow::Result<Self> {
        Self::builder(&config.base_url())
            .path_template(config.task_status_path())
            .token(config.token())
            .timeout(config.request_timeout())
            .build()
    }

    pub fn status_url(&self, task_id: i64) -> String {
        let path = self.path_template.replace("{id}", &task_id.to_string());
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl TaskStatusSource for HttpTaskStatusClient {
    async fn get_async_task_status(&self, task_id: i64) -> Result<AsyncTaskStatus, PollError> {
        let url = self.status_url(task_id);
        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| PollError::transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| PollError::transport(e.to_string()))?;

        if !status.is_success() {
            // Backend errors usually still carry the envelope; prefer its message.
            let message = envelope_message(&body)
                .unwrap_or_else(|| format!("HTTP {} from {}", status, url));
            return Err(PollError::transport(message));
        }

        parse_status_body(&body)
    }
}
