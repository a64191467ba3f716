//! Detected image labels

use serde::{Deserialize, Serialize};

/// Default maximum number of labels requested per image
pub const DEFAULT_MAX_LABELS: usize = 20;

/// Default confidence floor; labels below it are never returned
pub const DEFAULT_MIN_CONFIDENCE: f32 = 50.0;

/// A concept detected in an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Concept name as reported by the detector
    pub name: String,
    /// Confidence on a 0-100 scale
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Limits passed to the label detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelQuery {
    pub max_labels: usize,
    pub min_confidence: f32,
}

impl Default for LabelQuery {
    fn default() -> Self {
        Self {
            max_labels: DEFAULT_MAX_LABELS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}
