use std::collections::HashSet;

use super::finder::{MatchId, MatchResult};

/// Match ids a user has dismissed or already seen. Owned by the caller's
/// session state and applied after scoring.
#[derive(Debug, Clone, Default)]
pub struct DismissedMatches {
    ids: HashSet<MatchId>,
}

impl DismissedMatches {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = MatchId>,
    {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &MatchId) -> bool {
        self.ids.contains(id)
    }

    /// Drops dismissed results, preserving the ranking of the rest.
    pub fn retain_visible(&self, mut results: Vec<MatchResult>) -> Vec<MatchResult> {
        if !self.ids.is_empty() {
            results.retain(|result| !self.contains(&result.match_id()));
        }
        results
    }
}

impl FromIterator<String> for DismissedMatches {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(MatchId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_collected_from_strings_are_recognised() {
        let dismissed: DismissedMatches = ["req-1:lst-1".to_string()].into_iter().collect();

        assert!(dismissed.contains(&MatchId("req-1:lst-1".to_string())));
        assert!(!dismissed.contains(&MatchId("req-1:lst-2".to_string())));
        assert!(dismissed.retain_visible(Vec::new()).is_empty());
    }
}
