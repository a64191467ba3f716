//! Vision Infrastructure Layer
//!
//! HTTP implementations of the assessment ports:
//!
//! - [`HttpImageFetcher`]: downloads claim photos (`ImageSource`)
//! - [`HttpLabelDetector`]: calls the label-detection service (`LabelDetector`)

pub mod fetcher;
pub mod detector;

pub use fetcher::HttpImageFetcher;
pub use detector::{HttpLabelDetector, LabelDetectorConfig};
