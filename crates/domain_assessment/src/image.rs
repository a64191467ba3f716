//! Per-image results

use serde::{Deserialize, Serialize};

use crate::analyzer::{ImageStatus, ImageVerdict};
use crate::area::DamageArea;

/// The analysis outcome for one input URL
///
/// Produced once per URL by the batch processor and never mutated. The
/// `position` is the URL's index in the request and is what keeps
/// aggregation independent of completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
    pub position: usize,
    pub area: Option<DamageArea>,
    pub status: ImageStatus,
    pub severity: u8,
    pub quality: u8,
    pub notes: Option<String>,
}

impl ImageResult {
    /// Combines a URL with its verdict
    pub fn from_verdict(url: impl Into<String>, position: usize, verdict: ImageVerdict) -> Self {
        Self {
            url: url.into(),
            position,
            area: verdict.area,
            status: verdict.status,
            severity: verdict.severity,
            quality: verdict.quality,
            notes: verdict.notes,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ImageStatus::Ok
    }

    /// Area of an accepted image; `None` for unrelated and failed images
    pub fn analyzed_area(&self) -> Option<DamageArea> {
        if self.is_ok() {
            self.area
        } else {
            None
        }
    }
}
