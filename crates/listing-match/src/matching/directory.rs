use std::collections::{BTreeMap, HashMap};

use super::domain::{AgentId, Listing, PropertyRequest};

/// Read-only lookup from agent id to display name, owned by user management.
pub trait TeamDirectory: Send + Sync {
    fn display_name(&self, agent: &AgentId) -> Option<&str>;
}

impl TeamDirectory for HashMap<AgentId, String> {
    fn display_name(&self, agent: &AgentId) -> Option<&str> {
        self.get(agent).map(String::as_str)
    }
}

impl TeamDirectory for BTreeMap<AgentId, String> {
    fn display_name(&self, agent: &AgentId) -> Option<&str> {
        self.get(agent).map(String::as_str)
    }
}

/// Owner annotations attached to a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ownership {
    pub request_owner_name: Option<String>,
    pub property_owner_name: Option<String>,
    pub is_cross_consultant: bool,
}

impl Ownership {
    /// Names come from the directory when present; the cross-consultant flag
    /// only needs the ids.
    pub fn resolve(
        request: &PropertyRequest,
        listing: &Listing,
        directory: Option<&dyn TeamDirectory>,
    ) -> Self {
        let name_of = |owner: Option<&AgentId>| {
            owner
                .zip(directory)
                .and_then(|(agent, directory)| directory.display_name(agent))
                .map(str::to_string)
        };

        let is_cross_consultant = match (&request.owner_id, &listing.owner_id) {
            (Some(request_owner), Some(listing_owner)) => request_owner != listing_owner,
            _ => false,
        };

        Self {
            request_owner_name: name_of(request.owner_id.as_ref()),
            property_owner_name: name_of(listing.owner_id.as_ref()),
            is_cross_consultant,
        }
    }
}
