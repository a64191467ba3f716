//! Property-Based Test Generators
//!
//! Provides proptest strategies for labels and per-image results that hold
//! the domain invariants (accepted images always carry an area, discarded
//! images never do).

use proptest::prelude::*;

use domain_assessment::{DamageArea, ImageResult, ImageStatus, Label};

/// Strategy for generating areas
pub fn area_strategy() -> impl Strategy<Value = DamageArea> {
    prop::sample::select(DamageArea::ALL.to_vec())
}

/// Strategy for generating label names that exercise the keyword groups
pub fn label_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Wind Damage".to_string()),
        Just("Debris".to_string()),
        Just("Roof".to_string()),
        Just("Shingle".to_string()),
        Just("Garage Door".to_string()),
        Just("Brick Wall".to_string()),
        Just("Window".to_string()),
        Just("Fence".to_string()),
        Just("Tree".to_string()),
        Just("Sky".to_string()),
        "[A-Za-z ]{1,16}",
    ]
}

/// Strategy for generating labels above the default confidence floor
pub fn label_strategy() -> impl Strategy<Value = Label> {
    (label_name_strategy(), 50.0f32..=100.0f32).prop_map(|(name, confidence)| Label::new(name, confidence))
}

/// Strategy for generating a result at a given input position
pub fn image_result_strategy(position: usize) -> impl Strategy<Value = ImageResult> {
    let accepted = (area_strategy(), 0u8..=4, 1u8..=100, label_name_strategy()).prop_map(
        move |(area, severity, quality, notes)| ImageResult {
            url: format!("https://photos.example.com/{position}.jpg"),
            position,
            area: Some(area),
            status: ImageStatus::Ok,
            severity,
            quality,
            notes: Some(notes),
        },
    );

    let discarded = prop_oneof![Just(ImageStatus::Unrelated), Just(ImageStatus::Error)].prop_map(
        move |status| ImageResult {
            url: format!("https://photos.example.com/{position}.jpg"),
            position,
            area: None,
            status,
            severity: 0,
            quality: 0,
            notes: None,
        },
    );

    prop_oneof![3 => accepted, 2 => discarded]
}

/// Strategy for generating a full batch of results, in input order
pub fn batch_strategy(max_len: usize) -> impl Strategy<Value = Vec<ImageResult>> {
    (1..=max_len).prop_flat_map(|len| {
        (0..len)
            .map(image_result_strategy)
            .collect::<Vec<_>>()
    })
}
