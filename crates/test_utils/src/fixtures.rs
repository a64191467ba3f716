//! Scripted fakes for the assessment ports
//!
//! `FakeVision` scripts, per URL, what the image source returns and what the
//! label detector answers for that image. The fake source hands back the URL
//! bytes as the image payload, which is how the fake detector knows which
//! script entry to answer with.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_assessment::{FetchError, ImageSource, Label, LabelDetector, LabelQuery};

#[derive(Debug, Clone)]
enum FetchScript {
    Bytes(Vec<u8>),
    Fail(FetchError),
    Hang(Duration),
}

/// Image source that serves scripted payloads
#[derive(Debug, Default)]
pub struct ScriptedImageSource {
    scripts: HashMap<String, FetchScript>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl ScriptedImageSource {
    /// Number of fetches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for ScriptedImageSource {}

#[async_trait]
impl ImageSource for ScriptedImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        match self.scripts.get(url) {
            Some(FetchScript::Bytes(bytes)) => Ok(bytes.clone()),
            Some(FetchScript::Fail(e)) => Err(e.clone()),
            Some(FetchScript::Hang(duration)) => {
                tokio::time::sleep(*duration).await;
                Ok(url.as_bytes().to_vec())
            }
            None => Err(FetchError::Status { code: 404 }),
        }
    }
}

/// Label detector that answers from a script keyed by image payload
#[derive(Debug, Default)]
pub struct ScriptedLabelDetector {
    answers: HashMap<Vec<u8>, Result<Vec<Label>, String>>,
    calls: AtomicUsize,
    last_query: std::sync::Mutex<Option<LabelQuery>>,
}

impl ScriptedLabelDetector {
    /// Number of detection calls performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The limits passed on the most recent call
    pub fn last_query(&self) -> Option<LabelQuery> {
        self.last_query.lock().ok().and_then(|q| *q)
    }
}

impl DomainPort for ScriptedLabelDetector {}

#[async_trait]
impl LabelDetector for ScriptedLabelDetector {
    async fn detect_labels(&self, image: &[u8], query: LabelQuery) -> Result<Vec<Label>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query);
        }

        match self.answers.get(image) {
            Some(Ok(labels)) => Ok(labels.clone()),
            Some(Err(message)) => Err(PortError::ServiceUnavailable {
                service: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// Builder for a matched pair of scripted fakes
#[derive(Debug, Default)]
pub struct FakeVision {
    source: ScriptedImageSource,
    detector: ScriptedLabelDetector,
}

impl FakeVision {
    pub fn new() -> Self {
        Self::default()
    }

    /// The URL downloads fine and the detector reports these labels
    pub fn image(mut self, url: &str, labels: &[(&str, f32)]) -> Self {
        let payload = url.as_bytes().to_vec();
        self.source
            .scripts
            .insert(url.to_string(), FetchScript::Bytes(payload.clone()));
        let labels = labels.iter().map(|(n, c)| Label::new(*n, *c)).collect();
        self.detector.answers.insert(payload, Ok(labels));
        self
    }

    /// The URL downloads fine but shows nothing related to wind damage
    pub fn unrelated(self, url: &str) -> Self {
        self.image(url, &[("Lawn", 97.0), ("Tree", 88.0)])
    }

    /// The URL cannot be downloaded
    pub fn fetch_failure(mut self, url: &str, error: FetchError) -> Self {
        self.source.scripts.insert(url.to_string(), FetchScript::Fail(error));
        self
    }

    /// The URL downloads but returns no bytes
    pub fn empty_body(mut self, url: &str) -> Self {
        self.source
            .scripts
            .insert(url.to_string(), FetchScript::Bytes(Vec::new()));
        self
    }

    /// The URL takes `duration` to download
    pub fn hanging(mut self, url: &str, duration: Duration) -> Self {
        self.source.scripts.insert(url.to_string(), FetchScript::Hang(duration));
        self
    }

    /// The URL downloads but the detector fails on it
    pub fn detector_failure(mut self, url: &str) -> Self {
        let payload = url.as_bytes().to_vec();
        self.source
            .scripts
            .insert(url.to_string(), FetchScript::Bytes(payload.clone()));
        self.detector
            .answers
            .insert(payload, Err("label-detector".to_string()));
        self
    }

    /// Adds latency in front of an already scripted URL
    pub fn delayed(mut self, url: &str, delay: Duration) -> Self {
        self.source.delays.insert(url.to_string(), delay);
        self
    }

    pub fn build(self) -> (Arc<ScriptedImageSource>, Arc<ScriptedLabelDetector>) {
        (Arc::new(self.source), Arc::new(self.detector))
    }
}

/// Health probe that always reports the same status
#[derive(Debug, Clone, Copy)]
pub struct FixedHealth(pub AdapterHealth);

#[async_trait]
impl HealthCheckable for FixedHealth {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("fixed", self.0, 0)
    }
}

/// Claim photo URL on the fake photo host
pub fn photo_url(name: &str) -> String {
    format!("https://photos.example.com/claims/{name}.jpg")
}
