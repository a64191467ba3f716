//! Severity buckets derived from wind-damage label confidence

/// Bucket break points on the 0-100 confidence scale
pub const SEVERITY_BREAKPOINTS: [u32; 6] = [0, 60, 75, 85, 92, 100];

/// Highest severity bucket
pub const MAX_SEVERITY: u8 = 4;

/// Severity at or above which an image counts towards damage confirmation
pub const CONFIRMING_SEVERITY: u8 = 2;

/// Maps a label confidence onto a severity bucket (0-4)
///
/// The confidence is truncated to a whole number first. The bucket is the
/// number of break points at or below it, minus one, capped at 4.
pub fn severity_for_confidence(confidence: f32) -> u8 {
    let whole = if confidence.is_finite() && confidence > 0.0 {
        confidence.trunc() as u32
    } else {
        0
    };

    let reached = SEVERITY_BREAKPOINTS.iter().filter(|&&b| b <= whole).count();
    (reached.saturating_sub(1) as u8).min(MAX_SEVERITY)
}
