//! Assessment handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use domain_assessment::AssessmentRequest;
use crate::{AppState, error::ApiError};
use crate::dto::assessment::*;

/// Assesses the wind damage shown in a claim's photos
pub async fn assess_claim(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AssessClaimResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request: AssessmentRequest = AssessClaimRequest::from_payload(payload)?.into();

    let report = state.service.assess(request).await?;
    Ok(Json(report.into()))
}
