//! HTTP image fetcher

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use core_kernel::{DomainPort, PortError};
use domain_assessment::{FetchError, ImageSource};

const USER_AGENT: &str = "wind-damage-assessor/0.1";

/// Downloads images with a plain GET; any 2xx body is accepted
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpImageFetcher {
    /// Creates a fetcher whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `PortError::Connection` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, PortError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::connection_from("failed to build image HTTP client", e))?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                code: status.as_u16(),
            }
        } else {
            FetchError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl DomainPort for HttpImageFetcher {}

#[async_trait]
impl ImageSource for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.map_error(e))?;
        if bytes.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        debug!(url = %url, size = bytes.len(), "Image downloaded");
        Ok(bytes.to_vec())
    }
}
