use serde::Serialize;

use super::domain::{Listing, PropertyRequest};
use super::normalize::{constraint, folded, parse_rooms, positive, Band};

/// Points awarded to a mandatory criterion that passes.
pub const MANDATORY_MAX_SCORE: u8 = 20;
/// Points awarded to a mandatory criterion judged partial.
pub const PARTIAL_SCORE: u8 = 10;

/// Attribute compared by a criterion, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKey {
    Location,
    Price,
    Rooms,
    Area,
    PropertyType,
    Floor,
    Balcony,
}

impl CriterionKey {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Location,
            Self::Price,
            Self::Rooms,
            Self::Area,
            Self::PropertyType,
            Self::Floor,
            Self::Balcony,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Price => "Price",
            Self::Rooms => "Rooms",
            Self::Area => "Area",
            Self::PropertyType => "Property type",
            Self::Floor => "Floor",
            Self::Balcony => "Balcony",
        }
    }

    /// Advisory criteria are displayed but never scored.
    pub const fn is_mandatory(self) -> bool {
        !matches!(self, Self::Floor | Self::Balcony)
    }

    pub const fn max_score(self) -> u8 {
        if self.is_mandatory() {
            MANDATORY_MAX_SCORE
        } else {
            0
        }
    }

    pub const fn score_for(self, status: CriterionStatus) -> u8 {
        if !self.is_mandatory() {
            return 0;
        }
        match status {
            CriterionStatus::Pass => MANDATORY_MAX_SCORE,
            CriterionStatus::Partial => PARTIAL_SCORE,
            CriterionStatus::Fail => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    Pass,
    Partial,
    Fail,
}

/// One attribute-level judgment, kept with the raw values for audit display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCriterion {
    pub key: CriterionKey,
    pub label: &'static str,
    pub status: CriterionStatus,
    pub score: u8,
    pub max_score: u8,
    pub message: String,
    pub request_value: Option<String>,
    pub listing_value: Option<String>,
}

impl MatchCriterion {
    fn judge(key: CriterionKey, status: CriterionStatus, message: impl Into<String>) -> Self {
        Self {
            key,
            label: key.label(),
            status,
            score: key.score_for(status),
            max_score: key.max_score(),
            message: message.into(),
            request_value: None,
            listing_value: None,
        }
    }

    fn compared(mut self, request_value: Option<String>, listing_value: Option<String>) -> Self {
        self.request_value = request_value;
        self.listing_value = listing_value;
        self
    }
}

fn join_present(parts: &[Option<&str>]) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(", "))
    }
}

pub fn location(request: &PropertyRequest, listing: &Listing) -> MatchCriterion {
    use CriterionStatus::*;

    let wanted = join_present(&[
        request.neighborhood.as_deref(),
        request.district.as_deref(),
        request.city.as_deref(),
    ]);
    let offered = join_present(&[
        listing.neighborhood.as_deref(),
        listing.district.as_deref(),
        listing.city.as_deref(),
        listing.address.as_deref(),
    ]);

    let district = constraint(request.district.as_deref());
    let neighborhood = constraint(request.neighborhood.as_deref());
    let city = constraint(request.city.as_deref());

    let criterion = |status, message: String| {
        MatchCriterion::judge(CriterionKey::Location, status, message)
            .compared(wanted.clone(), offered.clone())
    };

    if district.is_none() && neighborhood.is_none() && city.is_none() {
        return criterion(Partial, "no location specified".to_string());
    }
    if offered.is_none() {
        return criterion(Partial, "listing location unknown".to_string());
    }

    let address = folded(listing.address.as_deref()).unwrap_or_default();
    let listing_district = folded(listing.district.as_deref()).unwrap_or_default();
    let listing_neighborhood = folded(listing.neighborhood.as_deref()).unwrap_or_default();
    let listing_city = folded(listing.city.as_deref()).unwrap_or_default();

    if let Some(district) = &district {
        if listing_district.contains(district.as_str()) || address.contains(district.as_str()) {
            return criterion(Pass, format!("district match: {district}"));
        }
    }
    if let Some(neighborhood) = &neighborhood {
        if listing_neighborhood.contains(neighborhood.as_str())
            || address.contains(neighborhood.as_str())
        {
            return criterion(Pass, format!("neighborhood match: {neighborhood}"));
        }
    }
    if let Some(city) = &city {
        if listing_city.contains(city.as_str()) || address.contains(city.as_str()) {
            return criterion(Partial, format!("same city only: {city}"));
        }
    }

    criterion(Fail, "location does not match".to_string())
}

pub fn price(request: &PropertyRequest, listing: &Listing, tolerance: f64) -> MatchCriterion {
    use CriterionStatus::*;

    let band = Band::new(request.min_price, request.max_price);
    let price = positive(listing.price);
    let criterion = |status, message: String| {
        MatchCriterion::judge(CriterionKey::Price, status, message)
            .compared(band.describe(), price.map(|price| price.to_string()))
    };

    if band.is_open() {
        return criterion(Partial, "no budget specified".to_string());
    }
    let Some(price) = price else {
        return criterion(Partial, "listing price unknown".to_string());
    };

    if band.contains(price) {
        criterion(Pass, "price within budget".to_string())
    } else if band.contains_within(price, tolerance) {
        criterion(
            Partial,
            format!("price within {:.0}% of budget", tolerance * 100.0),
        )
    } else {
        criterion(Fail, "price outside budget".to_string())
    }
}

pub fn rooms(request: &PropertyRequest, listing: &Listing) -> MatchCriterion {
    use CriterionStatus::*;

    let criterion = |status, message: String| {
        MatchCriterion::judge(CriterionKey::Rooms, status, message)
            .compared(request.rooms.clone(), listing.rooms.clone())
    };

    let wanted = request.rooms.as_deref().and_then(parse_rooms);
    let offered = listing.rooms.as_deref().and_then(parse_rooms);
    let (Some(wanted), Some(offered)) = (wanted, offered) else {
        return criterion(Partial, "room count missing".to_string());
    };

    match wanted.abs_diff(offered) {
        0 => criterion(Pass, format!("{offered} rooms as requested")),
        1 => criterion(Partial, format!("{offered} rooms, one off the {wanted} requested")),
        _ => criterion(Fail, format!("{offered} rooms, {wanted} requested")),
    }
}

pub fn area(request: &PropertyRequest, listing: &Listing, tolerance: f64) -> MatchCriterion {
    use CriterionStatus::*;

    let band = Band::new(request.min_area, request.max_area);
    let area = listing.usable_area();
    let criterion = |status, message: String| {
        MatchCriterion::judge(CriterionKey::Area, status, message)
            .compared(band.describe(), area.map(|area| area.to_string()))
    };

    if band.is_open() {
        return criterion(Partial, "no area range specified".to_string());
    }
    let Some(area) = area else {
        return criterion(Partial, "listing area unknown".to_string());
    };

    if band.contains(area) {
        criterion(Pass, format!("{area} m² within range"))
    } else if band.contains_within(area, tolerance) {
        criterion(
            Partial,
            format!("{area} m² within {:.0}% of range", tolerance * 100.0),
        )
    } else {
        criterion(Fail, format!("{area} m² outside range"))
    }
}

pub fn property_type(request: &PropertyRequest, listing: &Listing) -> MatchCriterion {
    use CriterionStatus::*;

    let criterion = |status, message: String| {
        MatchCriterion::judge(CriterionKey::PropertyType, status, message)
            .compared(request.property_type.clone(), listing.property_type.clone())
    };

    let Some(wanted) = constraint(request.property_type.as_deref()) else {
        return criterion(Partial, "any type acceptable".to_string());
    };
    let Some(offered) = folded(listing.property_type.as_deref()) else {
        return criterion(Partial, "listing type unknown".to_string());
    };

    if wanted == offered {
        criterion(Pass, format!("type matches: {offered}"))
    } else {
        criterion(Fail, format!("{offered} offered, {wanted} requested"))
    }
}

/// Advisory; `None` when neither side says anything about floors.
pub fn floor(request: &PropertyRequest, listing: &Listing) -> Option<MatchCriterion> {
    use CriterionStatus::*;

    let (status, message) = match (request.max_floor, listing.floor) {
        (None, None) => return None,
        (Some(max), Some(floor)) if floor <= max => (Pass, format!("floor {floor} acceptable")),
        (Some(max), Some(floor)) => (Partial, format!("floor {floor} exceeds preference {max}")),
        _ => (Partial, "insufficient floor data".to_string()),
    };

    Some(
        MatchCriterion::judge(CriterionKey::Floor, status, message).compared(
            request.max_floor.map(|max| max.to_string()),
            listing.floor.map(|floor| floor.to_string()),
        ),
    )
}

/// Advisory; `None` when neither side says anything about a balcony.
pub fn balcony(request: &PropertyRequest, listing: &Listing) -> Option<MatchCriterion> {
    use CriterionStatus::*;

    let (status, message) = match (request.balcony, listing.balcony) {
        (None, None) => return None,
        (Some(wanted), Some(offered)) if wanted == offered => {
            (Pass, "balcony preference met".to_string())
        }
        (Some(_), Some(_)) => (Fail, "balcony preference not met".to_string()),
        _ => (Partial, "balcony information incomplete".to_string()),
    };

    let describe = |value: Option<bool>| {
        value.map(|present| if present { "yes" } else { "no" }.to_string())
    };
    Some(
        MatchCriterion::judge(CriterionKey::Balcony, status, message)
            .compared(describe(request.balcony), describe(listing.balcony)),
    )
}
