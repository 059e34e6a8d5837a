//! # Battery Module
//!
//! The normalization and aggregation pipeline.
//!
//! This module handles:
//! - Per-battery readings with optional fields and a charge status
//! - Converting charge-domain readings to the energy domain
//! - Selecting one battery or combining all of them
//! - Estimating time until empty or full

pub mod aggregate;
pub mod estimate;
pub mod normalize;
pub mod reading;

pub use aggregate::{aggregate, combine, BatterySelector};
pub use estimate::{estimate, TimeEstimate};
pub use normalize::normalize;
pub use reading::{AggregateReading, BatteryReading, ChargeStatus, MeasurementUnit};
