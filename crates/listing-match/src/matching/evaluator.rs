use serde::Serialize;

use super::config::MatchingConfig;
use super::criteria::{self, MatchCriterion};
use super::domain::{Listing, ListingStatus, PropertyRequest};
use super::normalize::present;

/// Coarse classification of a match, shown as a badge on match cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBadge {
    Perfect,
    Good,
    Medium,
    Low,
}

impl MatchBadge {
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Perfect,
            70..=89 => Self::Good,
            50..=69 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Medium badges deliberately map to the low level.
    pub const fn level(self) -> MatchLevel {
        match self {
            Self::Perfect => MatchLevel::High,
            Self::Good => MatchLevel::Medium,
            Self::Medium | Self::Low => MatchLevel::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Good => "good",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    High,
    Medium,
    Low,
}

/// Why a pair was excluded before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateFailure {
    ListingUnavailable(ListingStatus),
    TransactionMismatch {
        wanted: String,
        offered: Option<String>,
    },
}

impl GateFailure {
    pub fn summary(&self) -> String {
        match self {
            GateFailure::ListingUnavailable(status) => {
                format!("listing is {}", status.label())
            }
            GateFailure::TransactionMismatch { wanted, offered } => match offered {
                Some(offered) => format!("wanted {wanted}, listing is {offered}"),
                None => format!("wanted {wanted}, listing has no transaction type"),
            },
        }
    }
}

/// Aggregate judgment for a pair that passed the hard gates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub total_score: u8,
    pub criteria: Vec<MatchCriterion>,
    pub badge: MatchBadge,
    pub level: MatchLevel,
}

/// Stateless evaluator applying the gates and criteria to one pair.
#[derive(Debug, Clone, Default)]
pub struct MatchEvaluator {
    config: MatchingConfig,
}

impl MatchEvaluator {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn check_gates(
        &self,
        request: &PropertyRequest,
        listing: &Listing,
    ) -> Result<(), GateFailure> {
        if let Some(status) = &listing.status {
            if !listing.is_available() {
                return Err(GateFailure::ListingUnavailable(status.clone()));
            }
        }

        if let Some(wanted) = present(request.transaction_type.as_deref()) {
            let offered = present(listing.transaction_type.as_deref());
            if offered != Some(wanted) {
                return Err(GateFailure::TransactionMismatch {
                    wanted: wanted.to_string(),
                    offered: offered.map(str::to_string),
                });
            }
        }

        Ok(())
    }

    pub fn evaluate(
        &self,
        request: &PropertyRequest,
        listing: &Listing,
    ) -> Result<Evaluation, GateFailure> {
        self.check_gates(request, listing)?;

        let mut criteria = vec![
            criteria::location(request, listing),
            criteria::price(request, listing, self.config.price_tolerance),
            criteria::rooms(request, listing),
            criteria::area(request, listing, self.config.area_tolerance),
            criteria::property_type(request, listing),
        ];
        criteria.extend(criteria::floor(request, listing));
        criteria.extend(criteria::balcony(request, listing));

        let total_score = criteria
            .iter()
            .filter(|criterion| criterion.key.is_mandatory())
            .map(|criterion| criterion.score)
            .sum();
        let badge = MatchBadge::from_score(total_score);

        Ok(Evaluation {
            total_score,
            criteria,
            badge,
            level: badge.level(),
        })
    }
}
