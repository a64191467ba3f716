//! Assessment DTOs
//!
//! Requests arrive either as the bare object or wrapped in an envelope whose
//! `body` field holds the object, or the object encoded as a JSON string.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use domain_assessment::{AreaCluster, AssessmentRequest, ClaimReport, SourceImages};
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct AssessClaimRequest {
    pub images: Option<Vec<String>>,
    pub claim_id: Option<String>,
    pub loss_type: Option<String>,
}

impl From<AssessClaimRequest> for AssessmentRequest {
    fn from(dto: AssessClaimRequest) -> Self {
        AssessmentRequest {
            images: dto.images.unwrap_or_default(),
            claim_id: dto.claim_id,
            loss_type: dto.loss_type,
        }
    }
}

impl AssessClaimRequest {
    /// Decodes a request from a raw JSON payload, unwrapping an envelope
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BadRequest` when the payload, or the string in
    /// its `body` field, is not a valid request object.
    pub fn from_payload(payload: Value) -> Result<Self, ApiError> {
        let inner = match payload {
            Value::Object(mut map) if map.contains_key("body") => match map.remove("body") {
                Some(Value::String(encoded)) => serde_json::from_str(&encoded)
                    .map_err(|e| ApiError::BadRequest(format!("body is not valid JSON: {e}")))?,
                Some(Value::Null) | None => return Ok(Self::default()),
                Some(other) => other,
            },
            other => other,
        };

        serde_json::from_value(inner)
            .map_err(|e| ApiError::BadRequest(format!("invalid assessment request: {e}")))
    }
}

#[derive(Debug, Serialize)]
pub struct AssessClaimResponse {
    pub claim_id: Option<String>,
    pub source_images: SourceImages,
    pub overall_damage_severity: f64,
    pub areas: Vec<AreaCluster>,
    pub data_gaps: Vec<String>,
    pub confidence: f64,
    pub generated_at: String,
}

impl From<ClaimReport> for AssessClaimResponse {
    fn from(report: ClaimReport) -> Self {
        Self {
            claim_id: report.claim_id,
            source_images: report.source_images,
            overall_damage_severity: report.overall_damage_severity,
            areas: report.areas,
            data_gaps: report.data_gaps,
            confidence: report.confidence,
            generated_at: report.generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}
