use std::collections::HashMap;

use crate::matching::domain::{
    AgentId, Listing, ListingId, ListingStatus, PropertyRequest, RequestId, RequestStatus,
};
use crate::matching::{MatchEvaluator, MatchingConfig};

/// Three-bedroom apartment in Kadıköy with a 2-3M TL budget.
pub(super) fn request() -> PropertyRequest {
    PropertyRequest {
        id: RequestId("req-1".to_string()),
        status: Some(RequestStatus::Active),
        transaction_type: Some("Satılık".to_string()),
        property_type: Some("Apartment".to_string()),
        min_price: Some(2_000_000.0),
        max_price: Some(3_000_000.0),
        rooms: Some("3+1".to_string()),
        min_area: Some(100.0),
        max_area: Some(140.0),
        city: Some("İstanbul".to_string()),
        district: Some("Kadıköy".to_string()),
        neighborhood: None,
        max_floor: None,
        balcony: None,
        owner_id: Some(AgentId("u1".to_string())),
    }
}

/// Listing satisfying every criterion of [`request`].
pub(super) fn listing() -> Listing {
    Listing {
        id: ListingId("lst-1".to_string()),
        transaction_type: Some("Satılık".to_string()),
        property_type: Some("Apartment".to_string()),
        price: Some(2_500_000.0),
        rooms: Some("3+1".to_string()),
        net_area: Some(120.0),
        gross_area: Some(135.0),
        area: None,
        city: Some("İstanbul".to_string()),
        district: Some("Kadıköy".to_string()),
        neighborhood: Some("Moda".to_string()),
        address: Some("Moda Cad. No:12, Kadıköy / İstanbul".to_string()),
        floor: None,
        balcony: None,
        status: Some(ListingStatus::Active),
        owner_id: Some(AgentId("u1".to_string())),
    }
}

pub(super) fn listing_with_id(id: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        ..listing()
    }
}

pub(super) fn request_with_id(id: &str) -> PropertyRequest {
    PropertyRequest {
        id: RequestId(id.to_string()),
        ..request()
    }
}

pub(super) fn evaluator() -> MatchEvaluator {
    MatchEvaluator::new(MatchingConfig::default())
}

pub(super) fn team() -> HashMap<AgentId, String> {
    HashMap::from([
        (AgentId("u1".to_string()), "Ayşe Yılmaz".to_string()),
        (AgentId("u2".to_string()), "Mehmet Demir".to_string()),
    ])
}
