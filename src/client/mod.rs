// Thin wrappers around the Showreel REST API. No business logic lives
// here: each method is one endpoint, one envelope decode.
pub mod models;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use crate::config;
use crate::error::ClientError;
use crate::session::SessionGuard;

use self::models::{Job, JobStatus, LoginResponse, MediaOutput, MetricsSummary, ProcessInfo, UserInfo};

pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    guard: Option<Arc<dyn SessionGuard>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid server url '{}': {}", base_url, e)))?;
        // Relative joins drop the last segment of a path without a
        // trailing slash, so normalize here once.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_config = &config::config().http;
        let http = Client::builder()
            .timeout(Duration::from_secs(http_config.timeout_secs))
            .connect_timeout(Duration::from_secs(http_config.connect_timeout_secs))
            .user_agent(&http_config.user_agent)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            http,
            base_url,
            token: None,
            guard: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Install the hook invoked on 401/403 responses.
    pub fn with_guard(mut self, guard: Arc<dyn SessionGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // --- Auth ---

    pub async fn login(
        &self,
        tenant: &str,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let body = json!({
            "tenant": tenant,
            "username": username,
            "password": password,
        });
        self.execute(Method::POST, "auth/login", Some(&body)).await
    }

    pub async fn whoami(&self) -> Result<UserInfo, ClientError> {
        self.execute(Method::GET, "auth/whoami", None).await
    }

    // --- Processes ---

    pub async fn list_processes(&self) -> Result<Vec<ProcessInfo>, ClientError> {
        self.execute(Method::GET, "api/processes", None).await
    }

    pub async fn get_process(&self, name: &str) -> Result<ProcessInfo, ClientError> {
        self.execute(Method::GET, &format!("api/processes/{}", name), None)
            .await
    }

    // --- Jobs ---

    pub async fn list_jobs(&self, status: Option<JobStatus>) -> Result<Vec<Job>, ClientError> {
        let path = match status {
            Some(status) => format!("api/jobs?status={}", status.as_str()),
            None => "api/jobs".to_string(),
        };
        self.execute(Method::GET, &path, None).await
    }

    pub async fn create_job(&self, process: &str, input: Value) -> Result<Job, ClientError> {
        let body = json!({
            "process": process,
            "input": input,
        });
        self.execute(Method::POST, "api/jobs", Some(&body)).await
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job, ClientError> {
        self.execute(Method::GET, &format!("api/jobs/{}", id), None)
            .await
    }

    pub async fn cancel_job(&self, id: Uuid) -> Result<Job, ClientError> {
        self.execute(Method::POST, &format!("api/jobs/{}/cancel", id), None)
            .await
    }

    // --- Outputs / metrics ---

    pub async fn list_outputs(&self, job_id: Uuid) -> Result<Vec<MediaOutput>, ClientError> {
        self.execute(Method::GET, &format!("api/jobs/{}/outputs", job_id), None)
            .await
    }

    pub async fn metrics_summary(&self) -> Result<MetricsSummary, ClientError> {
        self.execute(Method::GET, "api/metrics/summary", None).await
    }

    // --- Plumbing ---

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ClientError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid request path '{}': {}", path, e)))?;

        if config::config().http.enable_request_logging {
            tracing::debug!("{} {}", method, url);
        }

        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ClientError::Http)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if let Some(guard) = &self.guard {
                guard.on_unauthorized(status.as_u16()).await;
            }
        }

        let text = response.text().await.map_err(ClientError::Http)?;
        let payload: Value = match serde_json::from_str(&text) {
            Ok(payload) => payload,
            Err(e) if status.is_success() => {
                return Err(ClientError::InvalidResponse(format!(
                    "expected JSON envelope, got parse error: {}",
                    e
                )));
            }
            // Error bodies are best-effort; the status code carries enough
            Err(_) => Value::Null,
        };

        if status.is_success() {
            let data = payload.get("data").cloned().unwrap_or(Value::Null);
            return serde_json::from_value(data).map_err(ClientError::Json);
        }

        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        let code = payload
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN")
            .to_string();

        tracing::warn!("API error {} {}: {}", status.as_u16(), code, message);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ClientError::Unauthorized(message))
            }
            _ => Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            }),
        }
    }
}
