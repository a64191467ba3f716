//! Test Data Builders
//!
//! Builders for per-image results, so tests only spell out the fields they
//! care about.

use domain_assessment::{DamageArea, ImageResult, ImageStatus};

/// Builder for constructing `ImageResult` values
pub struct ImageResultBuilder {
    url: String,
    position: usize,
    area: Option<DamageArea>,
    status: ImageStatus,
    severity: u8,
    quality: u8,
    notes: Option<String>,
}

impl ImageResultBuilder {
    /// Starts from an accepted roof image with severity 2
    pub fn ok(url: impl Into<String>, position: usize) -> Self {
        Self {
            url: url.into(),
            position,
            area: Some(DamageArea::Roof),
            status: ImageStatus::Ok,
            severity: 2,
            quality: 100,
            notes: Some("Wind Damage".to_string()),
        }
    }

    /// Starts from an unrelated image
    pub fn unrelated(url: impl Into<String>, position: usize) -> Self {
        Self {
            url: url.into(),
            position,
            area: None,
            status: ImageStatus::Unrelated,
            severity: 0,
            quality: 0,
            notes: None,
        }
    }

    /// Starts from an image that could not be fetched or classified
    pub fn error(url: impl Into<String>, position: usize) -> Self {
        Self {
            status: ImageStatus::Error,
            ..Self::unrelated(url, position)
        }
    }

    pub fn with_area(mut self, area: DamageArea) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_severity(mut self, severity: u8) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> ImageResult {
        ImageResult {
            url: self.url,
            position: self.position,
            area: self.area,
            status: self.status,
            severity: self.severity,
            quality: self.quality,
            notes: self.notes,
        }
    }
}
