//! Rules-based matching of customer requests against property listings.
//!
//! The [`matching`] module holds the pure engine; [`import`] is the boundary
//! adapter that turns loosely shaped CSV exports into the canonical records the
//! engine consumes.

pub mod config;
pub mod error;
pub mod import;
pub mod matching;
pub mod telemetry;
