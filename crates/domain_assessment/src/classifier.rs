//! Label classifier adapter
//!
//! Wraps an injected [`LabelDetector`] and guarantees the cap and floor on
//! what reaches the analyzer, whatever the backend returns.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::label::{Label, LabelQuery};
use crate::ports::LabelDetector;

/// Classifies image bytes into a bounded, floored label list
#[derive(Clone)]
pub struct LabelClassifier {
    detector: Arc<dyn LabelDetector>,
    query: LabelQuery,
}

impl LabelClassifier {
    pub fn new(detector: Arc<dyn LabelDetector>, query: LabelQuery) -> Self {
        Self { detector, query }
    }

    /// Returns the labels for an image, or `None` when classification failed
    ///
    /// An empty payload never reaches the detector.
    pub async fn classify(&self, image: &[u8]) -> Option<Vec<Label>> {
        if image.is_empty() {
            return None;
        }

        match self.detector.detect_labels(image, self.query).await {
            Ok(labels) => {
                let labels: Vec<Label> = labels
                    .into_iter()
                    .filter(|l| l.confidence >= self.query.min_confidence)
                    .take(self.query.max_labels)
                    .collect();
                debug!(count = labels.len(), "Labels detected");
                Some(labels)
            }
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "Label detection failed");
                None
            }
        }
    }
}
