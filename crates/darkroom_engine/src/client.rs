use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::request::JobRequest;
use crate::types::Mode;

#[derive(Debug, Clone)]
pub struct CollaboratorSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound on one inference call; the service may take minutes.
    pub request_timeout: Duration,
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

impl CollaboratorSettings {
    pub fn endpoint_for(&self, mode: Mode) -> String {
        let path = match mode {
            Mode::Edit => "/api/image-edit",
            Mode::Generate => "/api/image-generate",
        };
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("service returned status {status}: {detail}")]
    HttpStatus { status: u16, detail: String },
    #[error("service rejected the job: {detail}")]
    Rejected { detail: String },
    #[error("service response carried no output image")]
    MissingOutput,
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

/// The remote inference service, opaque beyond its two operations. Returns
/// the locator of the produced image.
#[async_trait::async_trait]
pub trait Collaborator: Send + Sync {
    async fn run(&self, request: &JobRequest) -> Result<String, CollaboratorError>;
}

/// Response contract shared by both operations.
#[derive(Debug, Deserialize)]
struct JobResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl JobResponse {
    fn detail(&self) -> String {
        self.details
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "no detail provided".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    settings: CollaboratorSettings,
}

impl HttpCollaborator {
    pub fn new(settings: CollaboratorSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, CollaboratorError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| CollaboratorError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl Collaborator for HttpCollaborator {
    async fn run(&self, request: &JobRequest) -> Result<String, CollaboratorError> {
        let client = self.build_client()?;
        let endpoint = self.settings.endpoint_for(request.mode());

        let response = client
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies carry `{ error, details }`; fall back to the
            // status line when the body is not parseable.
            let detail = match response.json::<JobResponse>().await {
                Ok(body) => body.detail(),
                Err(_) => status.to_string(),
            };
            return Err(CollaboratorError::HttpStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let body: JobResponse = response.json().await.map_err(map_reqwest_error)?;
        if !body.success {
            return Err(CollaboratorError::Rejected {
                detail: body.detail(),
            });
        }
        // A 2xx round trip without a usable locator is still a failure; a
        // result must never enter history with a missing reference.
        match body.output {
            Some(output) if !output.is_empty() => Ok(output),
            _ => Err(CollaboratorError::MissingOutput),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> CollaboratorError {
    if err.is_timeout() {
        return CollaboratorError::Timeout;
    }
    CollaboratorError::Network(err.to_string())
}
