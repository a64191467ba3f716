//! Per-image damage analysis
//!
//! Turns the label set of one image into a verdict. Wind-damage detection
//! and area detection are independent passes over the same labels; an image
//! is only accepted when both succeed somewhere in the set.
//!
//! Both passes are last-match-wins in label order: the final wind-damage
//! label decides severity and notes, and the final area label decides the
//! area, regardless of confidence.

use serde::{Deserialize, Serialize};

use crate::area::DamageArea;
use crate::label::Label;
use crate::severity::severity_for_confidence;

/// Keywords marking a label as wind-damage evidence
pub const WIND_DAMAGE_KEYWORDS: [&str; 4] = ["wind", "damage", "debris", "shingle"];

/// Image quality assigned to every accepted image; no quality model is run
pub const DEFAULT_QUALITY: u8 = 100;

/// Outcome of analyzing one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    /// Wind damage found on an identified area
    Ok,
    /// Labels were available but did not show wind damage on a known area
    Unrelated,
    /// The image could not be fetched or classified
    Error,
}

/// Damage verdict for a single image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVerdict {
    pub area: Option<DamageArea>,
    pub status: ImageStatus,
    pub severity: u8,
    pub quality: u8,
    pub notes: Option<String>,
}

impl ImageVerdict {
    /// Verdict for an image with no labels at all
    pub fn error() -> Self {
        Self {
            area: None,
            status: ImageStatus::Error,
            severity: 0,
            quality: 0,
            notes: None,
        }
    }

    /// Verdict for an image whose labels did not qualify
    pub fn unrelated() -> Self {
        Self {
            status: ImageStatus::Unrelated,
            ..Self::error()
        }
    }
}

fn is_wind_damage(lowercase_name: &str) -> bool {
    WIND_DAMAGE_KEYWORDS.iter().any(|k| lowercase_name.contains(k))
}

/// Analyzes the labels of one image
///
/// `None` means the fetch or the classification failed.
pub fn analyze_labels(labels: Option<&[Label]>) -> ImageVerdict {
    let Some(labels) = labels else {
        return ImageVerdict::error();
    };

    let mut wind_damage = false;
    let mut area = None;
    let mut severity = 0;
    let mut notes = String::new();

    for label in labels {
        let name = label.name.to_lowercase();

        if is_wind_damage(&name) {
            wind_damage = true;
            severity = severity_for_confidence(label.confidence);
            notes = label.name.clone();
        }

        if let Some(detected) = DamageArea::detect(&name) {
            area = Some(detected);
        }
    }

    match area {
        Some(area) if wind_damage => ImageVerdict {
            area: Some(area),
            status: ImageStatus::Ok,
            severity,
            quality: DEFAULT_QUALITY,
            notes: Some(notes),
        },
        _ => ImageVerdict::unrelated(),
    }
}
