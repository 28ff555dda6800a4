//! Raw CSV row shapes. Legacy header spellings are folded into one canonical
//! field per concept here so the engine never sees them.
//!
//! Each concept must appear under one header only. An export carrying both the
//! canonical header and one of its aliases (say `net_area` and `netArea`) is
//! rejected as a whole with a `duplicate field` CSV error.

use serde::Deserialize;

use super::values::{
    canonical_transaction, empty_string_as_none, parse_flag, parse_integer, parse_number,
};
use crate::matching::domain::{
    AgentId, Listing, ListingId, ListingStatus, PropertyRequest, RequestId, RequestStatus,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ListingRow {
    #[serde(
        default,
        alias = "listing_id",
        alias = "property_id",
        deserialize_with = "empty_string_as_none"
    )]
    id: Option<String>,
    #[serde(
        default,
        alias = "transactionType",
        alias = "listing_type",
        deserialize_with = "empty_string_as_none"
    )]
    transaction_type: Option<String>,
    #[serde(
        default,
        alias = "propertyType",
        alias = "type",
        deserialize_with = "empty_string_as_none"
    )]
    property_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(
        default,
        alias = "room_count",
        alias = "roomCount",
        deserialize_with = "empty_string_as_none"
    )]
    rooms: Option<String>,
    #[serde(
        default,
        alias = "netArea",
        alias = "area_net",
        alias = "net_m2",
        deserialize_with = "empty_string_as_none"
    )]
    net_area: Option<String>,
    #[serde(
        default,
        alias = "grossArea",
        alias = "area_gross",
        alias = "gross_m2",
        deserialize_with = "empty_string_as_none"
    )]
    gross_area: Option<String>,
    #[serde(default, alias = "m2", alias = "size", deserialize_with = "empty_string_as_none")]
    area: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    district: Option<String>,
    #[serde(default, alias = "neighbourhood", deserialize_with = "empty_string_as_none")]
    neighborhood: Option<String>,
    #[serde(
        default,
        alias = "full_address",
        alias = "fullAddress",
        deserialize_with = "empty_string_as_none"
    )]
    address: Option<String>,
    #[serde(
        default,
        alias = "floor_number",
        alias = "floorNumber",
        alias = "current_floor",
        deserialize_with = "empty_string_as_none"
    )]
    floor: Option<String>,
    #[serde(
        default,
        alias = "has_balcony",
        alias = "hasBalcony",
        deserialize_with = "empty_string_as_none"
    )]
    balcony: Option<String>,
    #[serde(default, alias = "listing_status", deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(
        default,
        alias = "ownerId",
        alias = "agent_id",
        alias = "user_id",
        deserialize_with = "empty_string_as_none"
    )]
    owner_id: Option<String>,
}

impl ListingRow {
    /// `None` when the row carries no id.
    pub(crate) fn into_listing(self) -> Option<Listing> {
        Some(Listing {
            id: ListingId(self.id?),
            transaction_type: self.transaction_type.as_deref().map(canonical_transaction),
            property_type: self.property_type,
            price: self.price.as_deref().and_then(parse_number),
            rooms: self.rooms,
            net_area: self.net_area.as_deref().and_then(parse_number),
            gross_area: self.gross_area.as_deref().and_then(parse_number),
            area: self.area.as_deref().and_then(parse_number),
            city: self.city,
            district: self.district,
            neighborhood: self.neighborhood,
            address: self.address,
            floor: self.floor.as_deref().and_then(parse_integer),
            balcony: self.balcony.as_deref().and_then(parse_flag),
            status: self.status.as_deref().map(ListingStatus::parse),
            owner_id: self.owner_id.map(AgentId),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestRow {
    #[serde(
        default,
        alias = "request_id",
        alias = "demand_id",
        deserialize_with = "empty_string_as_none"
    )]
    id: Option<String>,
    #[serde(default, alias = "request_status", deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(
        default,
        alias = "transactionType",
        alias = "listing_type",
        deserialize_with = "empty_string_as_none"
    )]
    transaction_type: Option<String>,
    #[serde(
        default,
        alias = "propertyType",
        alias = "type",
        deserialize_with = "empty_string_as_none"
    )]
    property_type: Option<String>,
    #[serde(
        default,
        alias = "minPrice",
        alias = "budget_min",
        deserialize_with = "empty_string_as_none"
    )]
    min_price: Option<String>,
    #[serde(
        default,
        alias = "maxPrice",
        alias = "budget_max",
        deserialize_with = "empty_string_as_none"
    )]
    max_price: Option<String>,
    #[serde(
        default,
        alias = "room_count",
        alias = "roomCount",
        deserialize_with = "empty_string_as_none"
    )]
    rooms: Option<String>,
    #[serde(
        default,
        alias = "minArea",
        alias = "min_m2",
        alias = "area_min",
        deserialize_with = "empty_string_as_none"
    )]
    min_area: Option<String>,
    #[serde(
        default,
        alias = "maxArea",
        alias = "max_m2",
        alias = "area_max",
        deserialize_with = "empty_string_as_none"
    )]
    max_area: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    district: Option<String>,
    #[serde(default, alias = "neighbourhood", deserialize_with = "empty_string_as_none")]
    neighborhood: Option<String>,
    #[serde(
        default,
        alias = "maxFloor",
        alias = "floor_max",
        deserialize_with = "empty_string_as_none"
    )]
    max_floor: Option<String>,
    #[serde(
        default,
        alias = "balcony_required",
        alias = "wantsBalcony",
        deserialize_with = "empty_string_as_none"
    )]
    balcony: Option<String>,
    #[serde(
        default,
        alias = "ownerId",
        alias = "agent_id",
        alias = "user_id",
        deserialize_with = "empty_string_as_none"
    )]
    owner_id: Option<String>,
}

impl RequestRow {
    pub(crate) fn into_request(self) -> Option<PropertyRequest> {
        Some(PropertyRequest {
            id: RequestId(self.id?),
            status: self.status.as_deref().map(RequestStatus::parse),
            transaction_type: self.transaction_type.as_deref().map(canonical_transaction),
            property_type: self.property_type,
            min_price: self.min_price.as_deref().and_then(parse_number),
            max_price: self.max_price.as_deref().and_then(parse_number),
            rooms: self.rooms,
            min_area: self.min_area.as_deref().and_then(parse_number),
            max_area: self.max_area.as_deref().and_then(parse_number),
            city: self.city,
            district: self.district,
            neighborhood: self.neighborhood,
            max_floor: self.max_floor.as_deref().and_then(parse_integer),
            balcony: self.balcony.as_deref().and_then(parse_flag),
            owner_id: self.owner_id.map(AgentId),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamMemberRow {
    #[serde(
        default,
        alias = "user_id",
        alias = "agent_id",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) id: Option<String>,
    #[serde(
        default,
        alias = "display_name",
        alias = "full_name",
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) name: Option<String>,
}
