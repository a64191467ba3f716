//! Core Kernel - Foundational types shared by every assessor crate
//!
//! This crate provides the building blocks used across the workspace:
//! - Strongly-typed identifiers for requests and error correlation
//! - The port error taxonomy used by every external adapter
//! - Adapter health-check types

pub mod identifiers;
pub mod ports;

pub use identifiers::{AssessmentId, CorrelationId};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
