use serde::{Deserialize, Serialize};

/// Tunables for a matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Pairs scoring below this are dropped (0..=100).
    pub min_score: u8,
    /// Fraction by which the price band edges are widened for a partial match.
    pub price_tolerance: f64,
    /// Fraction by which the area band edges are widened for a partial match.
    pub area_tolerance: f64,
    /// Number of criterion labels surfaced as reasons on each result.
    pub reason_limit: usize,
    /// Worker threads used by the finder; 1 runs inline.
    pub workers: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_score: 30,
            price_tolerance: 0.10,
            area_tolerance: 0.15,
            reason_limit: 5,
            workers: 1,
        }
    }
}
