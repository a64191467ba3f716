//! HTTP label detection adapter
//!
//! Posts raw image bytes to a label-detection endpoint and decodes the
//! labels it returns. The endpoint receives the limits as query parameters:
//!
//! ```text
//! POST {endpoint}?max_labels=20&min_confidence=50
//! Content-Type: application/octet-stream
//!
//! 200 {"labels": [{"name": "Roof", "confidence": 97.1}, ...]}
//! ```
//!
//! Capitalised field names (`Labels`, `Name`, `Confidence`) are accepted
//! too, so a thin proxy in front of a managed vision API can forward its
//! response unchanged.
//!
//! Failures map onto `PortError`:
//! - Timeouts -> `PortError::Timeout`
//! - Connect errors -> `PortError::Connection`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Other non-2xx -> `PortError::Validation`
//! - Undecodable body -> `PortError::Transformation`

use std::time::{Duration, Instant};
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_assessment::{Label, LabelDetector, LabelQuery};

const SERVICE_NAME: &str = "label-detector";

/// Configuration for the HTTP label detector
#[derive(Debug, Clone)]
pub struct LabelDetectorConfig {
    /// Full URL of the detection endpoint
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LabelDetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000/detect-labels".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetectLabelsResponse {
    #[serde(default, alias = "Labels")]
    labels: Vec<DetectedLabel>,
}

#[derive(Debug, Deserialize)]
struct DetectedLabel {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Confidence")]
    confidence: f32,
}

/// Label detector backed by an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpLabelDetector {
    client: Client,
    config: LabelDetectorConfig,
}

impl HttpLabelDetector {
    /// # Errors
    ///
    /// Returns `PortError::Connection` if the HTTP client cannot be built.
    pub fn new(config: LabelDetectorConfig) -> Result<Self, PortError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::connection_from("failed to build label detector HTTP client", e))?;

        Ok(Self { client, config })
    }

    fn request_url(&self, query: LabelQuery) -> Result<Url, PortError> {
        Url::parse_with_params(
            &self.config.endpoint,
            &[
                ("max_labels", query.max_labels.to_string()),
                ("min_confidence", query.min_confidence.to_string()),
            ],
        )
        .map_err(|e| PortError::validation(format!("invalid detector endpoint: {e}")))
    }

    fn map_error(&self, err: reqwest::Error) -> PortError {
        if err.is_timeout() {
            PortError::Timeout {
                operation: "detect_labels".to_string(),
                duration_ms: self.config.timeout.as_millis() as u64,
            }
        } else if err.is_decode() {
            PortError::transformation(err)
        } else {
            PortError::connection_from("label detector request failed", err)
        }
    }
}

impl DomainPort for HttpLabelDetector {}

#[async_trait]
impl LabelDetector for HttpLabelDetector {
    async fn detect_labels(&self, image: &[u8], query: LabelQuery) -> Result<Vec<Label>, PortError> {
        let url = self.request_url(query)?;

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PortError::ServiceUnavailable {
                service: format!("{SERVICE_NAME} ({status})"),
            });
        }
        if !status.is_success() {
            return Err(PortError::validation(format!(
                "{SERVICE_NAME} rejected the image: {status}"
            )));
        }

        let body: DetectLabelsResponse = response.json().await.map_err(|e| self.map_error(e))?;
        debug!(count = body.labels.len(), "Label detector responded");

        Ok(body
            .labels
            .into_iter()
            .map(|l| Label::new(l.name, l.confidence))
            .collect())
    }
}

#[async_trait]
impl HealthCheckable for HttpLabelDetector {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = self.client.head(&self.config.endpoint).send().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(response) if response.status().is_server_error() => {
                HealthCheckResult::new(SERVICE_NAME, AdapterHealth::Degraded, latency_ms)
                    .with_message(response.status().to_string())
            }
            // Any other answer means the service is up; HEAD may not be routed
            Ok(_) => HealthCheckResult::new(SERVICE_NAME, AdapterHealth::Healthy, latency_ms),
            Err(e) => {
                warn!(error = %e, "Label detector health check failed");
                HealthCheckResult::new(SERVICE_NAME, AdapterHealth::Unhealthy, latency_ms)
                    .with_message(e.to_string())
            }
        }
    }
}
