//! Aggregation engine
//!
//! Folds the per-image results of a batch into a `ClaimReport`. Every
//! figure is computed from sums, counts and keyed maps, and representative
//! images are chosen by (quality, input position), so the report does not
//! depend on the order results arrived in.

use std::collections::{BTreeMap, BTreeSet};
use chrono::{DateTime, Utc};

use crate::area::DamageArea;
use crate::image::ImageResult;
use crate::report::{AreaCluster, ClaimReport, Peril, SourceImages};
use crate::severity::CONFIRMING_SEVERITY;

/// Evidence every claim is expected to include, keyed by area name
///
/// No keyword group maps to "attic" yet, so this gap is always reported.
pub const EXPECTED_EVIDENCE: [(&str, &str); 1] = [("attic", "No attic photos")];

/// Images at or above `CONFIRMING_SEVERITY` needed to confirm an area
pub const CONFIRMATION_THRESHOLD: usize = 2;

/// Confidence reported when no image was accepted
pub const CONFIDENCE_FLOOR: f64 = 0.1;

/// Upper bound on reported confidence
pub const CONFIDENCE_CEILING: f64 = 0.95;

struct AreaAccumulator<'a> {
    count: usize,
    severity_sum: u32,
    confirming: usize,
    representative: &'a ImageResult,
}

impl<'a> AreaAccumulator<'a> {
    fn new(first: &'a ImageResult) -> Self {
        Self {
            count: 0,
            severity_sum: 0,
            confirming: 0,
            representative: first,
        }
    }

    fn add(&mut self, result: &'a ImageResult) {
        self.count += 1;
        self.severity_sum += u32::from(result.severity);
        if result.severity >= CONFIRMING_SEVERITY {
            self.confirming += 1;
        }

        let current = self.representative;
        let better = result.quality > current.quality
            || (result.quality == current.quality && result.position < current.position);
        if better {
            self.representative = result;
        }
    }

    fn into_cluster(self, area: DamageArea) -> AreaCluster {
        AreaCluster {
            area,
            damage_confirmed: self.confirming >= CONFIRMATION_THRESHOLD,
            primary_peril: Peril::Wind,
            count: self.count,
            avg_severity: round2(f64::from(self.severity_sum) / self.count as f64),
            representative_images: vec![self.representative.url.clone()],
            notes: self.representative.notes.clone().unwrap_or_default(),
        }
    }
}

/// Builds the claim report for a processed batch
///
/// `total_images` is the number of URLs in the request. `generated_at` is
/// passed in so identical inputs yield identical reports.
pub fn aggregate(
    claim_id: Option<String>,
    total_images: usize,
    results: &[ImageResult],
    generated_at: DateTime<Utc>,
) -> ClaimReport {
    let mut by_area: BTreeMap<DamageArea, AreaAccumulator<'_>> = BTreeMap::new();
    let mut weighted_severity: u64 = 0;
    let mut quality_sum: u64 = 0;
    let mut accepted = 0usize;

    for result in results {
        let Some(area) = result.analyzed_area() else {
            continue;
        };

        accepted += 1;
        weighted_severity += u64::from(result.severity) * u64::from(result.quality);
        quality_sum += u64::from(result.quality);

        by_area
            .entry(area)
            .or_insert_with(|| AreaAccumulator::new(result))
            .add(result);
    }

    let discarded = results.len() - accepted;
    let observed: BTreeSet<DamageArea> = by_area.keys().copied().collect();
    let areas: Vec<AreaCluster> = by_area
        .into_iter()
        .map(|(area, acc)| acc.into_cluster(area))
        .collect();

    let overall_damage_severity = if quality_sum > 0 {
        round2(weighted_severity as f64 / quality_sum as f64)
    } else {
        0.0
    };

    ClaimReport {
        claim_id,
        source_images: SourceImages {
            total: total_images,
            analyzed: accepted + discarded,
            discarded_low_quality: discarded,
            clusters: areas.len(),
        },
        overall_damage_severity,
        areas,
        data_gaps: data_gaps(&observed),
        confidence: confidence(accepted, total_images),
        generated_at,
    }
}

/// Missing evidence, sorted
pub fn data_gaps(observed: &BTreeSet<DamageArea>) -> Vec<String> {
    let gaps: BTreeSet<String> = EXPECTED_EVIDENCE
        .iter()
        .filter(|(name, _)| !observed.iter().any(|a| a.as_str() == *name))
        .map(|(_, message)| (*message).to_string())
        .collect();
    gaps.into_iter().collect()
}

/// Pipeline confidence from the share of accepted images
pub fn confidence(accepted: usize, total_images: usize) -> f64 {
    if accepted == 0 || total_images == 0 {
        return CONFIDENCE_FLOOR;
    }
    let share = accepted as f64 / total_images as f64;
    (share * 0.9 + 0.1).min(CONFIDENCE_CEILING)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
