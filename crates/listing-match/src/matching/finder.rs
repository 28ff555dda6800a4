use std::fmt;
use std::thread;

use serde::Serialize;
use tracing::{debug, trace};

use super::config::MatchingConfig;
use super::criteria::{CriterionStatus, MatchCriterion};
use super::directory::{Ownership, TeamDirectory};
use super::domain::{Listing, ListingId, PropertyRequest, RequestId};
use super::evaluator::{Evaluation, MatchBadge, MatchEvaluator, MatchLevel};

/// Stable identifier of a (request, listing) pair, used for dismissal tracking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    pub fn new(request: &RequestId, listing: &ListingId) -> Self {
        Self(format!("{request}:{listing}"))
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scored, gate-passing pair. Recomputed on every run and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub request: PropertyRequest,
    pub listing: Listing,
    pub total_score: u8,
    pub criteria: Vec<MatchCriterion>,
    pub badge: MatchBadge,
    pub level: MatchLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_owner_name: Option<String>,
    pub is_cross_consultant: bool,
    /// Labels of the leading pass/partial criteria, for compact display.
    pub reasons: Vec<&'static str>,
}

impl MatchResult {
    pub fn match_id(&self) -> MatchId {
        MatchId::new(&self.request.id, &self.listing.id)
    }
}

/// Enumerates request/listing pairs, keeps those clearing the threshold and
/// ranks them by descending score.
#[derive(Debug, Clone, Default)]
pub struct MatchFinder {
    evaluator: MatchEvaluator,
}

impl MatchFinder {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            evaluator: MatchEvaluator::new(config),
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        self.evaluator.config()
    }

    /// Matches every active request against every listing.
    pub fn find(
        &self,
        listings: &[Listing],
        requests: &[PropertyRequest],
        directory: Option<&dyn TeamDirectory>,
    ) -> Vec<MatchResult> {
        let active: Vec<&PropertyRequest> =
            requests.iter().filter(|request| request.is_active()).collect();

        let workers = self.config().workers.max(1);
        let mut results = if workers > 1 && active.len() > 1 {
            self.collect_parallel(&active, listings, directory, workers)
        } else {
            self.collect(&active, listings, directory)
        };
        rank(&mut results);

        debug!(
            requests = requests.len(),
            active_requests = active.len(),
            listings = listings.len(),
            matches = results.len(),
            min_score = self.config().min_score,
            "match run complete"
        );
        results
    }

    /// Matches active requests against a single listing.
    pub fn for_listing(
        &self,
        listing: &Listing,
        requests: &[PropertyRequest],
        directory: Option<&dyn TeamDirectory>,
    ) -> Vec<MatchResult> {
        self.find(std::slice::from_ref(listing), requests, directory)
    }

    /// Matches a single request against the inventory. Inactive requests yield nothing.
    pub fn for_request(
        &self,
        request: &PropertyRequest,
        listings: &[Listing],
        directory: Option<&dyn TeamDirectory>,
    ) -> Vec<MatchResult> {
        self.find(listings, std::slice::from_ref(request), directory)
    }

    fn collect(
        &self,
        requests: &[&PropertyRequest],
        listings: &[Listing],
        directory: Option<&dyn TeamDirectory>,
    ) -> Vec<MatchResult> {
        let mut results = Vec::new();
        for request in requests {
            for listing in listings {
                if let Some(result) = self.match_pair(request, listing, directory) {
                    results.push(result);
                }
            }
        }
        results
    }

    /// Splits the request list into contiguous chunks, one per worker, and
    /// concatenates the partial lists in chunk order so the output equals
    /// the inline run.
    fn collect_parallel(
        &self,
        requests: &[&PropertyRequest],
        listings: &[Listing],
        directory: Option<&dyn TeamDirectory>,
        workers: usize,
    ) -> Vec<MatchResult> {
        let chunk_size = requests.len().div_ceil(workers);

        thread::scope(|scope| {
            let handles: Vec<_> = requests
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.collect(chunk, listings, directory)))
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }

    fn match_pair(
        &self,
        request: &PropertyRequest,
        listing: &Listing,
        directory: Option<&dyn TeamDirectory>,
    ) -> Option<MatchResult> {
        let evaluation = match self.evaluator.evaluate(request, listing) {
            Ok(evaluation) => evaluation,
            Err(gate) => {
                trace!(
                    request = %request.id,
                    listing = %listing.id,
                    reason = %gate.summary(),
                    "pair excluded"
                );
                return None;
            }
        };

        if evaluation.total_score < self.config().min_score {
            return None;
        }

        let Evaluation {
            total_score,
            criteria,
            badge,
            level,
        } = evaluation;
        let ownership = Ownership::resolve(request, listing, directory);
        let reasons = criteria
            .iter()
            .filter(|criterion| criterion.status != CriterionStatus::Fail)
            .take(self.config().reason_limit)
            .map(|criterion| criterion.label)
            .collect();

        Some(MatchResult {
            request: request.clone(),
            listing: listing.clone(),
            total_score,
            criteria,
            badge,
            level,
            request_owner_name: ownership.request_owner_name,
            property_owner_name: ownership.property_owner_name,
            is_cross_consultant: ownership.is_cross_consultant,
            reasons,
        })
    }
}

/// Stable sort by descending score; ties keep enumeration order.
fn rank(results: &mut [MatchResult]) {
    results.sort_by(|left, right| right.total_score.cmp(&left.total_score));
}

/// Convenience wrapper using the default tunables with a caller-chosen threshold.
pub fn find_matches(
    listings: &[Listing],
    requests: &[PropertyRequest],
    directory: Option<&dyn TeamDirectory>,
    min_score: u8,
) -> Vec<MatchResult> {
    let finder = MatchFinder::new(MatchingConfig {
        min_score,
        ..MatchingConfig::default()
    });
    finder.find(listings, requests, directory)
}
