//! End-to-end tests for the assessment pipeline against scripted ports

use std::sync::Arc;
use std::time::Duration;

use domain_assessment::batch::fetch_with_timeout;
use domain_assessment::{
    AssessmentError, AssessmentRequest, AssessmentSettings, BatchProcessor, DamageArea,
    DamageAssessmentService, FetchError, ImageStatus, LabelClassifier, LabelQuery,
};
use test_utils::{assert_report_invariants, assert_reports_equivalent, photo_url, FakeVision};

fn service_for(vision: FakeVision) -> (
    DamageAssessmentService,
    Arc<test_utils::ScriptedImageSource>,
    Arc<test_utils::ScriptedLabelDetector>,
) {
    let (source, detector) = vision.build();
    let service = DamageAssessmentService::new(
        source.clone(),
        detector.clone(),
        AssessmentSettings::default(),
    );
    (service, source, detector)
}

// ============================================================================
// Request Validation
// ============================================================================

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_images_rejected_without_port_calls() {
        let (service, source, detector) = service_for(FakeVision::new().unrelated("unused"));

        let result = service.assess(AssessmentRequest::new(vec![])).await;

        match result {
            Err(e @ AssessmentError::EmptyImages) => {
                assert_eq!(e.to_string(), "images list is empty");
                assert!(e.is_client_error());
            }
            other => panic!("expected EmptyImages, got {other:?}"),
        }
        assert_eq!(source.calls(), 0);
        assert_eq!(detector.calls(), 0);
    }
}

// ============================================================================
// Report Scenarios
// ============================================================================

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_roof_image_among_unrelated() {
        let a = photo_url("a");
        let (b, c) = (photo_url("b"), photo_url("c"));
        let vision = FakeVision::new()
            .image(&a, &[("roof shingle", 70.0), ("storm wind damage", 90.0)])
            .unrelated(&b)
            .unrelated(&c);
        let (service, _, _) = service_for(vision);

        let request = AssessmentRequest::new(vec![a.clone(), b, c])
            .with_claim_id("CLM-100")
            .with_loss_type("wind");
        let report = service.assess(request).await.unwrap();

        assert_eq!(report.claim_id.as_deref(), Some("CLM-100"));
        assert_eq!(report.source_images.total, 3);
        assert_eq!(report.source_images.analyzed, 3);
        assert_eq!(report.source_images.discarded_low_quality, 2);
        assert_eq!(report.source_images.clusters, 1);

        let roof = report.cluster(DamageArea::Roof).unwrap();
        assert_eq!(roof.count, 1);
        assert_eq!(roof.avg_severity, 3.0);
        assert!(!roof.damage_confirmed);
        assert_eq!(roof.representative_images, vec![a]);
        assert_eq!(roof.notes, "storm wind damage");

        assert_eq!(report.overall_damage_severity, 3.0);
        assert!((report.confidence - 0.4).abs() < 1e-9);
        assert_eq!(report.data_gaps, vec!["No attic photos".to_string()]);
    }

    #[tokio::test]
    async fn test_shingle_label_is_also_wind_evidence() {
        // "roof shingle" comes last and is a wind-damage label itself,
        // so its confidence decides the severity
        let a = photo_url("a");
        let vision = FakeVision::new()
            .image(&a, &[("storm wind damage", 90.0), ("roof shingle", 70.0)]);
        let (service, _, _) = service_for(vision);

        let report = service.assess(AssessmentRequest::new(vec![a])).await.unwrap();

        let roof = report.cluster(DamageArea::Roof).unwrap();
        assert_eq!(roof.avg_severity, 1.0);
        assert_eq!(roof.notes, "roof shingle");
    }

    #[tokio::test]
    async fn test_all_fetches_fail() {
        let urls: Vec<String> = (0..4).map(|i| photo_url(&format!("missing-{i}"))).collect();
        let vision = urls.iter().fold(FakeVision::new(), |v, url| {
            v.fetch_failure(url, FetchError::Status { code: 503 })
        });
        let (service, _, detector) = service_for(vision);

        let report = service.assess(AssessmentRequest::new(urls)).await.unwrap();

        assert!(report.areas.is_empty());
        assert_eq!(report.source_images.clusters, 0);
        assert_eq!(report.source_images.total, 4);
        assert_eq!(report.source_images.discarded_low_quality, 4);
        assert_eq!(report.overall_damage_severity, 0.0);
        assert_eq!(report.confidence, 0.1);
        assert!(report.data_gaps.contains(&"No attic photos".to_string()));
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmed_area_and_weighted_severity() {
        let urls: Vec<String> = (0..5).map(|i| photo_url(&format!("p{i}"))).collect();
        let vision = FakeVision::new()
            .image(&urls[0], &[("Wind Damage", 93.0), ("Roof", 99.0)])
            .image(&urls[1], &[("Debris", 80.0), ("Roof Ridge", 91.0)])
            .image(&urls[2], &[("Fence", 70.0), ("Damage", 61.0)])
            .unrelated(&urls[3])
            .detector_failure(&urls[4]);
        let (service, _, _) = service_for(vision);

        let report = service.assess(AssessmentRequest::new(urls.clone())).await.unwrap();

        let roof = report.cluster(DamageArea::Roof).unwrap();
        assert_eq!(roof.count, 2);
        assert_eq!(roof.avg_severity, 3.0);
        assert!(roof.damage_confirmed);
        assert_eq!(roof.representative_images, vec![urls[0].clone()]);

        let fence = report.cluster(DamageArea::Fence).unwrap();
        assert_eq!(fence.count, 1);
        assert!(!fence.damage_confirmed);

        // (4 + 2 + 1) / 3
        assert_eq!(report.overall_damage_severity, 2.33);
        assert!((report.confidence - (3.0 / 5.0 * 0.9 + 0.1)).abs() < 1e-9);
        assert_eq!(report.source_images.clusters, 2);
        assert_eq!(report.areas[0].area, DamageArea::Roof);
    }

    #[tokio::test]
    async fn test_duplicate_urls_processed_independently() {
        let a = photo_url("dup");
        let vision = FakeVision::new().image(&a, &[("Wind", 86.0), ("Garage", 90.0)]);
        let (service, source, _) = service_for(vision);

        let report = service
            .assess(AssessmentRequest::new(vec![a.clone(), a.clone()]))
            .await
            .unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(report.source_images.total, 2);
        let garage = report.cluster(DamageArea::Garage).unwrap();
        assert_eq!(garage.count, 2);
        assert!(garage.damage_confirmed);
        assert_eq!(report.confidence, 0.95);
    }

    #[tokio::test]
    async fn test_rerun_yields_equivalent_report() {
        let urls: Vec<String> = (0..6).map(|i| photo_url(&format!("r{i}"))).collect();
        let vision = FakeVision::new()
            .image(&urls[0], &[("Wind Damage", 77.0), ("Siding", 88.0)])
            .image(&urls[1], &[("Debris", 95.0), ("Window", 64.0)])
            .image(&urls[2], &[("Wind Damage", 85.0), ("Wall Panel", 80.0)])
            .unrelated(&urls[3])
            .fetch_failure(&urls[4], FetchError::Transport { message: "reset".into() })
            .image(&urls[5], &[("Debris", 60.0), ("Door", 82.0)])
            .delayed(&urls[0], Duration::from_millis(30))
            .delayed(&urls[2], Duration::from_millis(5));
        let (service, _, _) = service_for(vision);

        let request = AssessmentRequest::new(urls).with_claim_id("CLM-7");
        let first = service.assess(request.clone()).await.unwrap();
        let second = service.assess(request).await.unwrap();

        assert_reports_equivalent(&first, &second);
        let siding = first.cluster(DamageArea::Siding).unwrap();
        assert_eq!(siding.count, 2);
        assert!(siding.damage_confirmed);
    }
}

// ============================================================================
// Batch Processor
// ============================================================================

mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn test_one_result_per_url_with_positions() {
        let urls: Vec<String> = (0..15).map(|i| photo_url(&format!("b{i}"))).collect();
        let vision = urls.iter().enumerate().fold(FakeVision::new(), |v, (i, url)| {
            v.image(url, &[("Wind", 90.0), ("Roof", 90.0)])
                .delayed(url, Duration::from_millis(((15 - i) * 2) as u64))
        });
        let (source, detector) = vision.build();
        let processor = BatchProcessor::new(source, detector, AssessmentSettings::default());

        let results = processor.process(&urls).await.unwrap();

        assert_eq!(results.len(), urls.len());
        let mut positions: Vec<usize> = results.iter().map(|r| r.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, (0..15).collect::<Vec<_>>());
        for result in &results {
            assert_eq!(result.url, urls[result.position]);
            assert_eq!(result.status, ImageStatus::Ok);
        }
        assert_report_invariants(
            &domain_assessment::aggregate(None, urls.len(), &results, chrono::Utc::now()),
            &results,
        );
    }

    #[tokio::test]
    async fn test_failures_stay_local_to_their_image() {
        let (ok, slow, empty, broken) = (
            photo_url("ok"),
            photo_url("slow"),
            photo_url("empty"),
            photo_url("broken"),
        );
        let vision = FakeVision::new()
            .image(&ok, &[("Wind", 80.0), ("Door", 80.0)])
            .hanging(&slow, Duration::from_secs(5))
            .empty_body(&empty)
            .detector_failure(&broken);
        let (source, detector) = vision.build();
        let settings = AssessmentSettings {
            fetch_timeout: Duration::from_millis(50),
            ..AssessmentSettings::default()
        };
        let processor = BatchProcessor::new(source, detector.clone(), settings);

        let urls = vec![ok.clone(), slow.clone(), empty.clone(), broken.clone()];
        let results = processor.process(&urls).await.unwrap();

        let status_of = |url: &str| results.iter().find(|r| r.url == url).unwrap().status;
        assert_eq!(status_of(&ok), ImageStatus::Ok);
        assert_eq!(status_of(&slow), ImageStatus::Error);
        assert_eq!(status_of(&empty), ImageStatus::Error);
        assert_eq!(status_of(&broken), ImageStatus::Error);
        // Only the two images that downloaded reach the detector
        assert_eq!(detector.calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_timeout_reports_elapsed_bound() {
        let url = photo_url("slow");
        let (source, _) = FakeVision::new().hanging(&url, Duration::from_secs(5)).build();

        let result = fetch_with_timeout(source.as_ref(), &url, Duration::from_millis(20)).await;
        assert_eq!(result, Err(FetchError::Timeout { after_ms: 20 }));
    }
}

// ============================================================================
// Label Classifier
// ============================================================================

mod classifier_tests {
    use super::*;

    #[tokio::test]
    async fn test_cap_and_floor_enforced() {
        let url = photo_url("busy");
        let mut labels: Vec<(String, f32)> = (0..25).map(|i| (format!("Thing {i}"), 99.0)).collect();
        labels.insert(0, ("Faint".to_string(), 49.9));
        let borrowed: Vec<(&str, f32)> = labels.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let (_, detector) = FakeVision::new().image(&url, &borrowed).build();

        let classifier = LabelClassifier::new(detector.clone(), LabelQuery::default());
        let result = classifier.classify(url.as_bytes()).await.unwrap();

        assert_eq!(result.len(), 20);
        assert!(result.iter().all(|l| l.confidence >= 50.0));
        assert_eq!(result[0].name, "Thing 0");
        assert_eq!(detector.last_query(), Some(LabelQuery::default()));
    }

    #[tokio::test]
    async fn test_empty_payload_skips_detector() {
        let (_, detector) = FakeVision::new().build();
        let classifier = LabelClassifier::new(detector.clone(), LabelQuery::default());

        assert_eq!(classifier.classify(&[]).await, None);
        assert_eq!(detector.calls(), 0);
    }

    #[tokio::test]
    async fn test_detector_failure_yields_no_labels() {
        let url = photo_url("broken");
        let (_, detector) = FakeVision::new().detector_failure(&url).build();
        let classifier = LabelClassifier::new(detector, LabelQuery::default());

        assert_eq!(classifier.classify(url.as_bytes()).await, None);
    }

    #[tokio::test]
    async fn test_custom_query_is_forwarded() {
        let url = photo_url("q");
        let (_, detector) = FakeVision::new().image(&url, &[("Roof", 72.0)]).build();
        let query = LabelQuery { max_labels: 5, min_confidence: 70.0 };
        let classifier = LabelClassifier::new(detector.clone(), query);

        let labels = classifier.classify(url.as_bytes()).await.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(detector.last_query(), Some(query));
    }
}
