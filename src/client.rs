use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::config::PhishScoutConfig;
use crate::types::{ClassificationRequest, ClassificationResponse};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification request failed: {message}")]
    Transport { message: String },
    #[error("classification service returned status {status}")]
    Status { status: StatusCode },
    #[error("classification service returned invalid data: {message}")]
    InvalidResponse { message: String },
}

#[async_trait]
pub trait UrlClassifier: Send + Sync {
    fn endpoint(&self) -> &str;
    async fn classify(&self, url: &str) -> Result<ClassificationResponse, ClassifierError>;
}

#[derive(Clone)]
pub struct HttpClassifierClient {
    http: Client,
    base_url: String,
}

impl HttpClassifierClient {
    /// Builds a client with the configured request timeout applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &PhishScoutConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    pub fn with_http_client(http: Client, config: &PhishScoutConfig) -> Self {
        Self {
            http,
            base_url: env::var("PHISH_SCOUT_API_BASE_URL")
                .unwrap_or_else(|_| config.api_base_url.clone()),
        }
    }
}

#[async_trait]
impl UrlClassifier for HttpClassifierClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    // Single attempt: no retry, no backoff. Every failure collapses into the
    // uniform error presentation, so the variants only matter to the log.
    async fn classify(&self, url: &str) -> Result<ClassificationResponse, ClassifierError> {
        let request_url = format!("{}/predict", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&request_url)
            .json(&ClassificationRequest { url })
            .send()
            .await
            .map_err(|e| transport_error("unable to reach classification service", &request_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status { status });
        }

        response
            .json::<ClassificationResponse>()
            .await
            .map_err(|e| ClassifierError::InvalidResponse {
                message: format!("failed to parse classification response JSON: {e}"),
            })
    }
}

fn transport_error(context: &str, request_url: &str, error: reqwest::Error) -> ClassifierError {
    let mut kinds = Vec::new();
    if error.is_timeout() {
        kinds.push("timeout");
    }
    if error.is_connect() {
        kinds.push("connect");
    }
    if error.is_request() {
        kinds.push("request");
    }
    if error.is_body() {
        kinds.push("body");
    }
    if error.is_decode() {
        kinds.push("decode");
    }
    if kinds.is_empty() {
        kinds.push("unknown");
    }

    ClassifierError::Transport {
        message: format!(
            "{context}: {error}; request_url={request_url}; kinds={}",
            kinds.join(",")
        ),
    }
}
