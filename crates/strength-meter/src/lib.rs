//! Password strength meter: rule heuristics and guess-number estimates fused into one
//! monotonically improving score with deduplicated feedback.

pub mod config;
pub mod error;
pub mod meter;
pub mod telemetry;
