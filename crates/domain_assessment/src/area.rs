//! Building areas and the keyword groups that identify them

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical building component inferred from image labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageArea {
    Roof,
    Siding,
    Garage,
    Window,
    Door,
    Fence,
}

impl DamageArea {
    /// All areas, in scan and report order
    pub const ALL: [DamageArea; 6] = [
        DamageArea::Roof,
        DamageArea::Siding,
        DamageArea::Garage,
        DamageArea::Window,
        DamageArea::Door,
        DamageArea::Fence,
    ];

    /// Lowercase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageArea::Roof => "roof",
            DamageArea::Siding => "siding",
            DamageArea::Garage => "garage",
            DamageArea::Window => "window",
            DamageArea::Door => "door",
            DamageArea::Fence => "fence",
        }
    }

    /// Keywords that map a label onto this area
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DamageArea::Roof => &["roof", "shingle", "ridge"],
            DamageArea::Siding => &["siding", "wall", "panel"],
            DamageArea::Garage => &["garage"],
            DamageArea::Window => &["window"],
            DamageArea::Door => &["door"],
            DamageArea::Fence => &["fence"],
        }
    }

    /// Returns the last area (in `ALL` order) whose keywords occur in the
    /// lowercased label name
    ///
    /// A name such as "garage door" matches both garage and door; the later
    /// group wins, matching the last-match-wins rule of the label scan.
    pub fn detect(lowercase_name: &str) -> Option<DamageArea> {
        Self::ALL
            .iter()
            .rev()
            .find(|area| area.keywords().iter().any(|k| lowercase_name.contains(k)))
            .copied()
    }
}

impl fmt::Display for DamageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_single_group() {
        assert_eq!(DamageArea::detect("roof"), Some(DamageArea::Roof));
        assert_eq!(DamageArea::detect("asphalt shingle"), Some(DamageArea::Roof));
        assert_eq!(DamageArea::detect("brick wall"), Some(DamageArea::Siding));
        assert_eq!(DamageArea::detect("picket fence"), Some(DamageArea::Fence));
    }

    #[test]
    fn test_detect_later_group_wins() {
        assert_eq!(DamageArea::detect("garage door"), Some(DamageArea::Door));
        assert_eq!(DamageArea::detect("roof window"), Some(DamageArea::Window));
    }

    #[test]
    fn test_detect_no_match() {
        assert_eq!(DamageArea::detect("tree"), None);
        assert_eq!(DamageArea::detect("attic"), None);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&DamageArea::Garage).unwrap();
        assert_eq!(json, "\"garage\"");
        assert_eq!(DamageArea::Garage.to_string(), "garage");
    }
}
