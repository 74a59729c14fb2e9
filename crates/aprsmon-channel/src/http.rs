//! Request/response API for device configuration.
//!
//! Three endpoints, all answering `{"status": "success" | "error", ...}`:
//!
//! | call | endpoint |
//! |---|---|
//! | [`fetch_config`](LocalConfigApi::fetch_config) | `GET /api/config` |
//! | [`submit_config`](LocalConfigApi::submit_config) | `POST /api/config` |
//! | [`restart_reception`](LocalConfigApi::restart_reception) | `POST /api/restart_reception` |
//!
//! The body is parsed regardless of the HTTP status code; only a body that is
//! not the expected JSON counts as a transport failure.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use aprsmon_core::prelude::*;
use aprsmon_core::ConfigRecord;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    config: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiResponse {
    fn is_success(&self) -> bool {
        self.status == "success"
    }

    fn into_outcome(self) -> ApiOutcome {
        if self.is_success() {
            ApiOutcome::Success {
                message: self.message,
            }
        } else {
            ApiOutcome::Rejected {
                message: self.message.unwrap_or_else(|| "unknown error".to_string()),
            }
        }
    }
}

/// Backend verdict on a command that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Success { message: Option<String> },
    /// The backend answered `status: "error"`.
    Rejected { message: String },
}

impl ApiOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success { .. })
    }
}

/// Configuration exchange with the backend.
#[trait_variant::make(ConfigApi: Send)]
pub trait LocalConfigApi {
    /// Fetch the current device configuration.
    ///
    /// A `status: "error"` answer is returned as [`Error::Backend`].
    async fn fetch_config(&self) -> Result<ConfigRecord>;

    /// Submit a full configuration record.
    async fn submit_config(&self, record: &ConfigRecord) -> Result<ApiOutcome>;

    /// Ask the backend to restart the reception pipeline.
    async fn restart_reception(&self) -> Result<ApiOutcome>;
}

/// HTTP implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| Error::invalid_url(base_url, e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::invalid_url(
                base_url,
                format!("unsupported scheme '{}'", base.scheme()),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::invalid_url(self.base.as_str(), e.to_string()))
    }

    async fn read_envelope(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("failed to read response body: {e}")))?;
        serde_json::from_str::<ApiResponse>(&body).map_err(|e| {
            Error::http(format!(
                "unexpected response (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })
    }
}

impl ConfigApi for BackendClient {
    async fn fetch_config(&self) -> Result<ConfigRecord> {
        let url = self.endpoint("/api/config")?;
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::http(format!("GET /api/config failed: {e}")))?;

        let envelope = Self::read_envelope(response).await?;
        if !envelope.is_success() {
            let message = envelope
                .message
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(Error::backend(message));
        }

        match envelope.config {
            Some(config) => ConfigRecord::from_json(&config),
            None => Err(Error::backend("response did not include a configuration")),
        }
    }

    async fn submit_config(&self, record: &ConfigRecord) -> Result<ApiOutcome> {
        let url = self.endpoint("/api/config")?;
        debug!("POST {} ({} fields)", url, record.len());
        let response = self
            .http
            .post(url)
            .json(&record.to_json())
            .send()
            .await
            .map_err(|e| Error::http(format!("POST /api/config failed: {e}")))?;

        Ok(Self::read_envelope(response).await?.into_outcome())
    }

    async fn restart_reception(&self) -> Result<ApiOutcome> {
        let url = self.endpoint("/api/restart_reception")?;
        debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| Error::http(format!("POST /api/restart_reception failed: {e}")))?;

        Ok(Self::read_envelope(response).await?.into_outcome())
    }
}
