//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the damage assessor test suite.
//!
//! # Modules
//!
//! - `fixtures`: Scripted fakes for the image source and label detector ports
//! - `builders`: Builder patterns for per-image results
//! - `assertions`: Report comparison and invariant checks
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
