//! Turn catalog detail records into [`Venue`]s, one parser per [`VenueKind`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::VenueError;
use crate::types::{Coordinates, Venue, VenueKind};

/// Longest venue name kept, in words.
pub const MAX_NAME_WORDS: usize = 5;

/// Entry of the per-city listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceRef {
    pub sports_place_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SportsPlaceDetail {
    sports_place_id: i64,
    #[serde(rename = "type")]
    place_type: PlaceType,
    location: PlaceLocation,
    #[serde(default)]
    properties: Option<PlaceProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceType {
    name: String,
    type_code: i32,
}

#[derive(Debug, Deserialize)]
struct PlaceLocation {
    coordinates: PlaceCoordinates,
    city: PlaceCity,
}

#[derive(Debug, Deserialize)]
struct PlaceCoordinates {
    wgs84: Coordinates,
}

#[derive(Debug, Deserialize)]
struct PlaceCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlaceProperties {
    #[serde(rename = "infoFi", default)]
    info_fi: Option<String>,
}

/// Parse one detail record of the given kind.
///
/// # Errors
/// [`VenueError::Parse`] when an expected field is missing or mistyped.
pub fn parse_venue(kind: VenueKind, detail: Value) -> Result<Venue, VenueError> {
    match kind {
        VenueKind::Sport => parse_sport_venue(detail),
    }
}

fn parse_sport_venue(detail: Value) -> Result<Venue, VenueError> {
    let place: SportsPlaceDetail = serde_json::from_value(detail)
        .map_err(|e| VenueError::Parse(format!("sports place detail: {}", e)))?;

    Ok(Venue {
        id: place.sports_place_id,
        name: truncate_words(&place.place_type.name, MAX_NAME_WORDS),
        coordinates: place.location.coordinates.wgs84,
        city_name: place.location.city.name,
        info: place
            .properties
            .and_then(|p| p.info_fi)
            .unwrap_or_default(),
        category_code: place.place_type.type_code,
    })
}

/// Keep at most `max_words` space-separated words of `name`.
pub fn truncate_words(name: &str, max_words: usize) -> String {
    let words: Vec<&str> = name.split(' ').collect();
    if words.len() > max_words {
        words[..max_words].join(" ")
    } else {
        name.to_string()
    }
}
