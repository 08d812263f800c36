//! Venue catalog for Sportlocate
//!
//! Looks up a city's venues in the LIPAS sport facility catalog, caches them
//! per city, filters them by category and picks weather-appropriate
//! recommendations.

pub mod catalog;
pub mod categories;
pub mod city_codes;
pub mod error;
pub mod parse;
pub mod recommend;
pub mod types;

pub use catalog::{filter_by_categories, VenueCatalog, NO_SELECTION};
pub use categories::{member_codes, CategoryDirectory, INDOOR_GROUP_CODES};
pub use city_codes::{CityCodes, CityEntry};
pub use error::VenueError;
pub use parse::{parse_venue, truncate_words, MAX_NAME_WORDS};
pub use recommend::{admitted_codes, eligible_venues, recommend};
pub use types::{Coordinates, Venue, VenueCategory, VenueKind, UNASSIGNED_VENUE_ID};
