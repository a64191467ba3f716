//! Concurrent batch processor
//!
//! Fans fetch, classify and analyze out over the worker pool, one job per
//! URL. Per-image failures become `status=error` results; only a pool
//! failure aborts the batch.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::analyzer::analyze_labels;
use crate::classifier::LabelClassifier;
use crate::error::PoolError;
use crate::image::ImageResult;
use crate::label::LabelQuery;
use crate::pool::{WorkerPool, DEFAULT_WORKERS};
use crate::ports::{FetchError, ImageSource, LabelDetector};

/// Default bound on a single image download
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables of the assessment pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentSettings {
    pub max_workers: usize,
    pub fetch_timeout: Duration,
    pub label_query: LabelQuery,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_WORKERS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            label_query: LabelQuery::default(),
        }
    }
}

/// Processes a batch of image URLs into per-image results
#[derive(Clone)]
pub struct BatchProcessor {
    source: Arc<dyn ImageSource>,
    classifier: LabelClassifier,
    pool: WorkerPool,
    fetch_timeout: Duration,
}

impl BatchProcessor {
    pub fn new(
        source: Arc<dyn ImageSource>,
        detector: Arc<dyn LabelDetector>,
        settings: AssessmentSettings,
    ) -> Self {
        Self {
            source,
            classifier: LabelClassifier::new(detector, settings.label_query),
            pool: WorkerPool::new(settings.max_workers),
            fetch_timeout: settings.fetch_timeout,
        }
    }

    /// Produces exactly one `ImageResult` per URL, in completion order
    ///
    /// Duplicate URLs are processed independently.
    pub async fn process(&self, urls: &[String]) -> Result<Vec<ImageResult>, PoolError> {
        let jobs: Vec<(usize, String)> = urls.iter().cloned().enumerate().collect();
        let source = Arc::clone(&self.source);
        let classifier = self.classifier.clone();
        let fetch_timeout = self.fetch_timeout;

        let completed = self
            .pool
            .run(jobs, move |(position, url)| {
                let source = Arc::clone(&source);
                let classifier = classifier.clone();
                async move { process_image(source, classifier, fetch_timeout, position, url).await }
            })
            .await?;

        Ok(completed.into_iter().map(|c| c.output).collect())
    }
}

async fn process_image(
    source: Arc<dyn ImageSource>,
    classifier: LabelClassifier,
    fetch_timeout: Duration,
    position: usize,
    url: String,
) -> ImageResult {
    let labels = match fetch_with_timeout(source.as_ref(), &url, fetch_timeout).await {
        Ok(bytes) => classifier.classify(&bytes).await,
        Err(e) => {
            warn!(url = %url, error = %e, "Could not download image");
            None
        }
    };

    let verdict = analyze_labels(labels.as_deref());
    debug!(
        url = %url,
        status = ?verdict.status,
        area = ?verdict.area,
        severity = verdict.severity,
        "Image analyzed"
    );

    ImageResult::from_verdict(url, position, verdict)
}

/// Fetches with a hard time bound, treating an empty payload as a failure
pub async fn fetch_with_timeout(
    source: &dyn ImageSource,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let bytes = tokio::time::timeout(timeout, source.fetch(url))
        .await
        .map_err(|_| FetchError::Timeout {
            after_ms: timeout.as_millis() as u64,
        })??;

    if bytes.is_empty() {
        return Err(FetchError::EmptyBody);
    }
    Ok(bytes)
}
