//! The matching engine: criterion evaluators, the pair evaluator and the
//! finder that ranks every compatible (request, listing) pair.
//!
//! Everything here is pure. Inputs are borrowed snapshots and results are
//! plain values rebuilt on each call.

mod config;
pub mod criteria;
mod directory;
mod dismissal;
pub mod domain;
mod evaluator;
mod finder;
pub(crate) mod normalize;
mod summary;

#[cfg(test)]
mod tests;

pub use config::MatchingConfig;
pub use criteria::{CriterionKey, CriterionStatus, MatchCriterion};
pub use directory::{Ownership, TeamDirectory};
pub use dismissal::DismissedMatches;
pub use domain::{
    AgentId, Listing, ListingId, ListingStatus, PropertyRequest, RequestId, RequestStatus,
};
pub use evaluator::{Evaluation, GateFailure, MatchBadge, MatchEvaluator, MatchLevel};
pub use finder::{find_matches, MatchFinder, MatchId, MatchResult};
pub use summary::MatchSummary;
