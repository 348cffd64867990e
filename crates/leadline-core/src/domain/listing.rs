use crate::domain::ids::ListingId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
    Plot,
    Villa,
}

impl PropertyType {
    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
            PropertyType::Plot => "plot",
            PropertyType::Villa => "villa",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(PropertyType::Residential),
            "commercial" => Some(PropertyType::Commercial),
            "plot" => Some(PropertyType::Plot),
            "villa" => Some(PropertyType::Villa),
            _ => None,
        }
    }

    pub const fn all() -> &'static [PropertyType] {
        &[
            PropertyType::Residential,
            PropertyType::Commercial,
            PropertyType::Plot,
            PropertyType::Villa,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Inactive,
    Sold,
}

impl ListingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
            ListingStatus::Sold => "sold",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ListingStatus::Active),
            "inactive" => Some(ListingStatus::Inactive),
            "sold" => Some(ListingStatus::Sold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub size: Option<String>,
    pub property_type: PropertyType,
    pub listing_category: String,
    pub status: ListingStatus,
    pub brochure_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::PropertyType;

    #[test]
    fn property_type_parse_round_trip() {
        for kind in PropertyType::all() {
            let parsed = PropertyType::parse(kind.as_str()).expect("parse property type");
            assert_eq!(*kind, parsed);
        }
    }
}
