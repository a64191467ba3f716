//! Ports for the external collaborators of the assessment pipeline
//!
//! The HTTP implementations live in `infra_vision`; tests use the scripted
//! fakes from `test_utils`.

use async_trait::async_trait;
use thiserror::Error;

use core_kernel::{DomainPort, PortError};
use crate::label::{Label, LabelQuery};

/// Why an image could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("unexpected status {code}")]
    Status { code: u16 },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("response body was empty")]
    EmptyBody,
}

/// Retrieves raw image bytes for a URL
#[async_trait]
pub trait ImageSource: DomainPort {
    /// Fetches the image payload
    ///
    /// Implementations must report every failure as a `FetchError`; a
    /// successful result is never empty.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Black-box image label detection service
#[async_trait]
pub trait LabelDetector: DomainPort {
    /// Detects labels in an image, honoring the query limits
    async fn detect_labels(&self, image: &[u8], query: LabelQuery) -> Result<Vec<Label>, PortError>;
}
