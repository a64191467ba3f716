//! Custom Test Assertions
//!
//! Assertion helpers for claim reports that give more meaningful failure
//! messages than a plain `assert_eq!` on the whole report.

use domain_assessment::{ClaimReport, ImageResult};

/// Asserts that two reports are identical apart from `generated_at`
///
/// # Panics
///
/// Panics naming the first differing section
pub fn assert_reports_equivalent(actual: &ClaimReport, expected: &ClaimReport) {
    assert_eq!(actual.claim_id, expected.claim_id, "claim_id differs");
    assert_eq!(actual.source_images, expected.source_images, "source_images differ");
    assert_eq!(
        actual.overall_damage_severity, expected.overall_damage_severity,
        "overall_damage_severity differs"
    );
    assert_eq!(actual.areas, expected.areas, "areas differ");
    assert_eq!(actual.data_gaps, expected.data_gaps, "data_gaps differ");
    assert_eq!(actual.confidence, expected.confidence, "confidence differs");
}

/// Asserts the structural invariants a report must hold for its inputs
///
/// # Panics
///
/// Panics if counts, bounds, or per-area averages are inconsistent with
/// `results`
pub fn assert_report_invariants(report: &ClaimReport, results: &[ImageResult]) {
    let accepted: Vec<&ImageResult> = results.iter().filter(|r| r.is_ok()).collect();
    let sources = &report.source_images;

    assert_eq!(sources.analyzed, results.len(), "analyzed must count every processed image");
    assert_eq!(
        sources.analyzed,
        accepted.len() + sources.discarded_low_quality,
        "analyzed must equal accepted + discarded"
    );
    assert_eq!(sources.clusters, report.areas.len(), "clusters must match areas");

    assert!(
        (0.1..=0.95).contains(&report.confidence),
        "confidence {} out of bounds",
        report.confidence
    );
    assert!(
        (0.0..=4.0).contains(&report.overall_damage_severity),
        "overall severity {} out of bounds",
        report.overall_damage_severity
    );

    for cluster in &report.areas {
        let members: Vec<&&ImageResult> =
            accepted.iter().filter(|r| r.area == Some(cluster.area)).collect();
        assert!(!members.is_empty(), "cluster {} has no accepted image", cluster.area);
        assert_eq!(cluster.count, members.len(), "count differs for {}", cluster.area);

        let mean = members.iter().map(|r| f64::from(r.severity)).sum::<f64>() / members.len() as f64;
        assert!(
            (cluster.avg_severity - mean).abs() < 0.0051,
            "avg_severity {} for {} is not the rounded mean {}",
            cluster.avg_severity,
            cluster.area,
            mean
        );
        assert_eq!(cluster.representative_images.len(), 1);
        assert!(
            members.iter().any(|r| r.url == cluster.representative_images[0]),
            "representative image for {} is not one of its members",
            cluster.area
        );
    }
}
