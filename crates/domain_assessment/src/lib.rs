//! Wind-Damage Assessment Domain
//!
//! This crate turns the photos attached to a claim into a claim-level
//! wind-damage report.
//!
//! # Pipeline
//!
//! ```text
//! URLs -> [worker pool: fetch -> classify -> analyze] -> ImageResults -> aggregate -> ClaimReport
//! ```
//!
//! The image source and label detector are ports (see [`ports`]) injected
//! into [`DamageAssessmentService`].

pub mod area;
pub mod severity;
pub mod label;
pub mod ports;
pub mod classifier;
pub mod analyzer;
pub mod image;
pub mod pool;
pub mod batch;
pub mod report;
pub mod aggregation;
pub mod service;
pub mod error;

pub use area::DamageArea;
pub use label::{Label, LabelQuery};
pub use ports::{FetchError, ImageSource, LabelDetector};
pub use classifier::LabelClassifier;
pub use analyzer::{analyze_labels, ImageStatus, ImageVerdict};
pub use image::ImageResult;
pub use pool::{Completed, WorkerPool};
pub use batch::{AssessmentSettings, BatchProcessor};
pub use report::{AreaCluster, ClaimReport, Peril, SourceImages};
pub use aggregation::aggregate;
pub use service::{AssessmentRequest, DamageAssessmentService};
pub use error::{AssessmentError, PoolError};
