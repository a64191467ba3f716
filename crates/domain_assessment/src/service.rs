//! Assessment service
//!
//! Orchestrates one claim assessment: validate the request, process the
//! batch, and aggregate the results into a report.

use std::sync::Arc;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use core_kernel::AssessmentId;
use crate::aggregation::aggregate;
use crate::batch::{AssessmentSettings, BatchProcessor};
use crate::error::AssessmentError;
use crate::ports::{ImageSource, LabelDetector};
use crate::report::ClaimReport;

/// A request to assess the photos attached to a claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub claim_id: Option<String>,
    #[serde(default)]
    pub loss_type: Option<String>,
}

impl AssessmentRequest {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            ..Default::default()
        }
    }

    pub fn with_claim_id(mut self, claim_id: impl Into<String>) -> Self {
        self.claim_id = Some(claim_id.into());
        self
    }

    pub fn with_loss_type(mut self, loss_type: impl Into<String>) -> Self {
        self.loss_type = Some(loss_type.into());
        self
    }

    /// Rejects requests with nothing to analyze
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if self.images.is_empty() {
            return Err(AssessmentError::EmptyImages);
        }
        Ok(())
    }
}

/// Service for assessing wind damage on a claim
///
/// The image source and label detector are injected at construction, so the
/// same service runs against HTTP adapters in production and fakes in tests.
#[derive(Clone)]
pub struct DamageAssessmentService {
    processor: BatchProcessor,
}

impl DamageAssessmentService {
    pub fn new(
        source: Arc<dyn ImageSource>,
        detector: Arc<dyn LabelDetector>,
        settings: AssessmentSettings,
    ) -> Self {
        Self {
            processor: BatchProcessor::new(source, detector, settings),
        }
    }

    /// Assesses a claim
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::EmptyImages` before touching any port when
    /// the request has no images, and `AssessmentError::Pool` if the worker
    /// pool failed.
    #[instrument(
        name = "assessment",
        skip(self, request),
        fields(
            assessment_id = %AssessmentId::new_v7(),
            claim_id = request.claim_id.as_deref().unwrap_or("-"),
            loss_type = request.loss_type.as_deref().unwrap_or("-"),
            images = request.images.len(),
        )
    )]
    pub async fn assess(&self, request: AssessmentRequest) -> Result<ClaimReport, AssessmentError> {
        request.validate()?;

        let results = self.processor.process(&request.images).await?;
        let report = aggregate(request.claim_id, request.images.len(), &results, Utc::now());

        info!(
            clusters = report.source_images.clusters,
            discarded = report.source_images.discarded_low_quality,
            overall_damage_severity = report.overall_damage_severity,
            confidence = report.confidence,
            "Assessment complete"
        );

        Ok(report)
    }
}
