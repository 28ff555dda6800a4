use serde::Serialize;

use super::evaluator::MatchBadge;
use super::finder::MatchResult;

/// Roll-up of a result set for dashboards and CLI output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub perfect: usize,
    pub good: usize,
    pub medium: usize,
    pub low: usize,
    pub cross_consultant: usize,
    pub top_score: Option<u8>,
    pub average_score: Option<f64>,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        let mut score_sum = 0u32;
        for result in results {
            match result.badge {
                MatchBadge::Perfect => summary.perfect += 1,
                MatchBadge::Good => summary.good += 1,
                MatchBadge::Medium => summary.medium += 1,
                MatchBadge::Low => summary.low += 1,
            }
            if result.is_cross_consultant {
                summary.cross_consultant += 1;
            }
            score_sum += u32::from(result.total_score);
            summary.top_score = summary.top_score.max(Some(result.total_score));
        }

        if !results.is_empty() {
            let average = f64::from(score_sum) / results.len() as f64;
            summary.average_score = Some((average * 10.0).round() / 10.0);
        }

        summary
    }
}
