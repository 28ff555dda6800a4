use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize::fold;

/// Identifier wrapper for property listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

/// Identifier wrapper for customer requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

/// Identifier of the agent (consultant) owning a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a listing. Only active (or unspecified) listings can be matched.
///
/// Parsed from English or Turkish labels; a blank label counts as active and
/// anything unrecognised is kept verbatim and treated as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListingStatus {
    Active,
    Inactive,
    Sold,
    Rented,
    Other(String),
}

impl ListingStatus {
    pub fn parse(raw: &str) -> Self {
        Self::recognise(&fold(raw))
            .or_else(|| Self::recognise(&raw.trim().to_lowercase()))
            .unwrap_or_else(|| Self::Other(raw.trim().to_string()))
    }

    fn recognise(key: &str) -> Option<Self> {
        match key {
            "" | "active" | "aktif" | "yayında" | "yayinda" => Some(Self::Active),
            "inactive" | "passive" | "pasif" => Some(Self::Inactive),
            "sold" | "satıldı" | "satildi" => Some(Self::Sold),
            "rented" | "kiralandı" | "kiralandi" => Some(Self::Rented),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Sold => "sold",
            Self::Rented => "rented",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ListingStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ListingStatus> for String {
    fn from(value: ListingStatus) -> Self {
        value.label().to_string()
    }
}

/// Lifecycle of a customer request. Only active requests produce matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestStatus {
    Active,
    Inactive,
    Fulfilled,
    Other(String),
}

impl RequestStatus {
    pub fn parse(raw: &str) -> Self {
        Self::recognise(&fold(raw))
            .or_else(|| Self::recognise(&raw.trim().to_lowercase()))
            .unwrap_or_else(|| Self::Other(raw.trim().to_string()))
    }

    fn recognise(key: &str) -> Option<Self> {
        match key {
            "active" | "aktif" => Some(Self::Active),
            "inactive" | "passive" | "pasif" => Some(Self::Inactive),
            "fulfilled" | "completed" | "closed" | "tamamlandı" | "tamamlandi" => {
                Some(Self::Fulfilled)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Fulfilled => "fulfilled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for RequestStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RequestStatus> for String {
    fn from(value: RequestStatus) -> Self {
        value.label().to_string()
    }
}

/// A property offered for sale or rent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub transaction_type: Option<String>,
    pub property_type: Option<String>,
    pub price: Option<f64>,
    /// Room token such as `"3+1"` (bedrooms + living rooms).
    pub rooms: Option<String>,
    pub net_area: Option<f64>,
    pub gross_area: Option<f64>,
    pub area: Option<f64>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    pub floor: Option<i32>,
    pub balcony: Option<bool>,
    pub status: Option<ListingStatus>,
    pub owner_id: Option<AgentId>,
}

impl Listing {
    /// Area used for comparison: net, then gross, then the generic field.
    /// The first finite positive value wins.
    pub fn usable_area(&self) -> Option<f64> {
        [self.net_area, self.gross_area, self.area]
            .into_iter()
            .flatten()
            .find(|value| value.is_finite() && *value > 0.0)
    }

    /// A listing without a status is treated as active.
    pub fn is_available(&self) -> bool {
        matches!(self.status, None | Some(ListingStatus::Active))
    }
}

/// Customer search criteria (a "demand").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRequest {
    pub id: RequestId,
    pub status: Option<RequestStatus>,
    pub transaction_type: Option<String>,
    pub property_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub rooms: Option<String>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
    pub max_floor: Option<i32>,
    /// `Some(true)` requires a balcony, `Some(false)` asks for none.
    pub balcony: Option<bool>,
    pub owner_id: Option<AgentId>,
}

impl PropertyRequest {
    pub fn is_active(&self) -> bool {
        self.status == Some(RequestStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_status_understands_turkish_labels() {
        assert_eq!(ListingStatus::parse("Aktif"), ListingStatus::Active);
        assert_eq!(ListingStatus::parse("PASİF"), ListingStatus::Inactive);
        assert_eq!(ListingStatus::parse("Satıldı"), ListingStatus::Sold);
        assert_eq!(ListingStatus::parse("kiralandi"), ListingStatus::Rented);
        assert_eq!(ListingStatus::parse("INACTIVE"), ListingStatus::Inactive);
        assert_eq!(
            ListingStatus::parse(" archived "),
            ListingStatus::Other("archived".to_string())
        );
    }

    #[test]
    fn usable_area_prefers_net_then_gross_then_generic() {
        let mut listing = Listing {
            net_area: Some(0.0),
            gross_area: Some(135.0),
            area: Some(150.0),
            ..Listing::default()
        };
        assert_eq!(listing.usable_area(), Some(135.0));

        listing.net_area = Some(118.0);
        assert_eq!(listing.usable_area(), Some(118.0));

        listing.net_area = None;
        listing.gross_area = None;
        assert_eq!(listing.usable_area(), Some(150.0));

        listing.area = Some(-5.0);
        assert_eq!(listing.usable_area(), None);
    }

    #[test]
    fn listing_without_status_is_available() {
        let mut listing = Listing::default();
        assert!(listing.is_available());
        listing.status = Some(ListingStatus::Rented);
        assert!(!listing.is_available());
    }

    #[test]
    fn request_status_round_trips_through_json() {
        let request: PropertyRequest =
            serde_json::from_str(r#"{"id":"r-1","status":"Aktif"}"#).expect("valid json");
        assert!(request.is_active());

        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["status"], "active");
    }
}
