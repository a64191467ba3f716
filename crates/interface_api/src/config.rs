//! API configuration

use std::time::Duration;
use serde::Deserialize;

use domain_assessment::{AssessmentSettings, LabelQuery};

/// Environment variable prefix, e.g. `ASSESSOR_PORT=9090`
pub const ENV_PREFIX: &str = "ASSESSOR";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Label detection endpoint
    pub label_detector_url: String,
    /// Label detection request timeout in seconds
    pub label_detector_timeout_secs: u64,
    /// Per-image download timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Concurrent image workers per request
    pub max_workers: usize,
    /// Labels requested per image
    pub max_labels: usize,
    /// Minimum label confidence (0-100)
    pub min_confidence: f32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            label_detector_url: "http://localhost:9000/detect-labels".to_string(),
            label_detector_timeout_secs: 30,
            fetch_timeout_secs: 10,
            max_workers: 10,
            max_labels: 20,
            min_confidence: 50.0,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `ASSESSOR_*` environment variables,
    /// using the defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("label_detector_url", defaults.label_detector_url)?
            .set_default("label_detector_timeout_secs", defaults.label_detector_timeout_secs)?
            .set_default("fetch_timeout_secs", defaults.fetch_timeout_secs)?
            .set_default("max_workers", defaults.max_workers as u64)?
            .set_default("max_labels", defaults.max_labels as u64)?
            .set_default("min_confidence", f64::from(defaults.min_confidence))?
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pipeline settings derived from this configuration
    pub fn assessment_settings(&self) -> AssessmentSettings {
        AssessmentSettings {
            max_workers: self.max_workers,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            label_query: LabelQuery {
                max_labels: self.max_labels,
                min_confidence: self.min_confidence,
            },
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn label_detector_timeout(&self) -> Duration {
        Duration::from_secs(self.label_detector_timeout_secs)
    }
}
