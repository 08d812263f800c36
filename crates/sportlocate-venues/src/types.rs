use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VenueError;

/// Id of a venue that has not been assigned one by the catalog.
pub const UNASSIGNED_VENUE_ID: i64 = -100;

/// WGS84 position of a venue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

/// A point of interest shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub city_name: String,
    pub info: String,
    pub category_code: i32,
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            id: UNASSIGNED_VENUE_ID,
            name: String::new(),
            coordinates: Coordinates { lon: 0.0, lat: 0.0 },
            city_name: String::new(),
            info: String::new(),
            category_code: UNASSIGNED_VENUE_ID as i32,
        }
    }
}

/// A named grouping of fine-grained venue type codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCategory {
    pub name: String,
    pub category_code: i32,
    pub member_codes: BTreeSet<i32>,
}

impl VenueCategory {
    pub fn new(
        name: impl Into<String>,
        category_code: i32,
        members: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            name: name.into(),
            category_code,
            member_codes: members.into_iter().collect(),
        }
    }

    pub fn contains(&self, venue_code: i32) -> bool {
        self.member_codes.contains(&venue_code)
    }
}

/// Kinds of venue the catalog knows how to fetch and parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    #[default]
    Sport,
}

impl VenueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sport => "sport",
        }
    }
}

impl FromStr for VenueKind {
    type Err = VenueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sport" => Ok(Self::Sport),
            other => Err(VenueError::UnsupportedKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_venue_is_unassigned() {
        let venue = Venue::default();
        assert_eq!(venue.id, UNASSIGNED_VENUE_ID);
        assert!(venue.name.is_empty());
    }

    #[test]
    fn test_category_membership() {
        let category = VenueCategory::new("Ice sports", 2500, [2510, 2520]);
        assert!(category.contains(2510));
        assert!(!category.contains(1110));
    }

    #[test]
    fn test_venue_kind_parsing() {
        assert_eq!("sport".parse::<VenueKind>().unwrap(), VenueKind::Sport);
        assert_eq!(" Sport ".parse::<VenueKind>().unwrap(), VenueKind::Sport);
        assert!(matches!(
            "restaurant".parse::<VenueKind>(),
            Err(VenueError::UnsupportedKind(kind)) if kind == "restaurant"
        ));
    }

    #[test]
    fn test_venue_serializes_as_plain_record() {
        let venue = Venue {
            id: 7,
            name: "Swimming hall".into(),
            coordinates: Coordinates { lon: 23.7, lat: 61.5 },
            city_name: "Tampere".into(),
            info: String::new(),
            category_code: 3110,
        };
        let json = serde_json::to_value(&venue).unwrap();
        assert_eq!(json["coordinates"]["lat"], 61.5);
        assert_eq!(json["category_code"], 3110);
    }
}
