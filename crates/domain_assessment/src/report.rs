//! Claim-level damage report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::area::DamageArea;

/// The peril every cluster is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Peril {
    Wind,
}

/// Counts describing the input batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImages {
    /// Number of URLs in the request
    pub total: usize,
    /// Number of images processed, accepted or not
    pub analyzed: usize,
    /// Unrelated and failed images
    pub discarded_low_quality: usize,
    /// Number of distinct areas with at least one accepted image
    pub clusters: usize,
}

/// Summary of the accepted images sharing one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaCluster {
    pub area: DamageArea,
    pub damage_confirmed: bool,
    pub primary_peril: Peril,
    pub count: usize,
    pub avg_severity: f64,
    pub representative_images: Vec<String>,
    pub notes: String,
}

/// The assessment returned for a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReport {
    pub claim_id: Option<String>,
    pub source_images: SourceImages,
    pub overall_damage_severity: f64,
    pub areas: Vec<AreaCluster>,
    pub data_gaps: Vec<String>,
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

impl ClaimReport {
    /// Looks up the cluster for an area
    pub fn cluster(&self, area: DamageArea) -> Option<&AreaCluster> {
        self.areas.iter().find(|c| c.area == area)
    }
}
