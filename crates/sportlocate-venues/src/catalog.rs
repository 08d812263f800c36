//! Per-city venue cache, category filtering and the current result set.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use sportlocate_core::ApiClient;
use sportlocate_weather::WeatherReport;

use crate::categories::{member_codes, CategoryDirectory};
use crate::city_codes::CityCodes;
use crate::error::VenueError;
use crate::parse::{parse_venue, PlaceRef};
use crate::recommend::recommend;
use crate::types::{Venue, VenueCategory, VenueKind};

/// No venue selected.
pub const NO_SELECTION: i64 = -1;

/// Venues of `venues` whose type code belongs to any of `categories`,
/// in their original order.
pub fn filter_by_categories(venues: &[Venue], categories: &[VenueCategory]) -> Vec<Venue> {
    let accepted = member_codes(categories);
    venues
        .iter()
        .filter(|v| accepted.contains(&v.category_code))
        .cloned()
        .collect()
}

/// The venue catalog engine.
///
/// City listings are fetched at most once per city and kept for the life of
/// the catalog. Not internally synchronized: share it behind a mutex.
#[derive(Debug)]
pub struct VenueCatalog {
    client: ApiClient,
    lang: String,
    kind: VenueKind,
    city_codes: CityCodes,
    categories: Arc<CategoryDirectory>,
    cache: HashMap<String, Arc<Vec<Venue>>>,
    current: Vec<Venue>,
    selected_venue_id: i64,
}

impl VenueCatalog {
    pub fn new(
        client: ApiClient,
        lang: impl Into<String>,
        kind: VenueKind,
        city_codes: CityCodes,
        categories: Arc<CategoryDirectory>,
    ) -> Self {
        Self {
            client,
            lang: lang.into(),
            kind,
            city_codes,
            categories,
            cache: HashMap::new(),
            current: Vec::new(),
            selected_venue_id: NO_SELECTION,
        }
    }

    pub fn kind(&self) -> VenueKind {
        self.kind
    }

    pub fn categories(&self) -> &Arc<CategoryDirectory> {
        &self.categories
    }

    pub fn city_codes(&self) -> &CityCodes {
        &self.city_codes
    }

    /// All venues of `city`, fetched on first request and cached after.
    ///
    /// A cache hit returns the same list without touching the network.
    ///
    /// # Errors
    /// [`VenueError::UnknownCity`] for a city missing from the code table,
    /// [`VenueError::CatalogUnavailable`] or [`VenueError::Parse`] when any
    /// request of the fetch fails. Nothing is cached in that case.
    pub async fn venues_for_city(&mut self, city: &str) -> Result<Arc<Vec<Venue>>, VenueError> {
        let key = city.trim().to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Venue cache hit for {}", key);
            return Ok(Arc::clone(cached));
        }

        let code = self.city_codes.code_for(&key)?;
        let venues = Arc::new(self.fetch_city(code).await?);
        tracing::info!("Cached {} venues for {} (code {})", venues.len(), key, code);

        self.cache.insert(key, Arc::clone(&venues));
        Ok(venues)
    }

    /// Venues of `city` that belong to any of `categories`.
    ///
    /// Replaces the current result set with the returned list.
    ///
    /// # Errors
    /// Same as [`Self::venues_for_city`].
    pub async fn filtered_venues(
        &mut self,
        city: &str,
        categories: &[VenueCategory],
    ) -> Result<Vec<Venue>, VenueError> {
        let venues = self.venues_for_city(city).await?;
        let filtered = filter_by_categories(&venues, categories);
        tracing::debug!(
            "{} of {} venues in {} match {} categories",
            filtered.len(),
            venues.len(),
            city,
            categories.len()
        );

        self.current = filtered.clone();
        Ok(filtered)
    }

    /// Recommend one venue of the current result set for `weather`.
    ///
    /// When a venue is found the current result set narrows to just that
    /// venue; otherwise it is left alone.
    pub fn recommendation<R: Rng + ?Sized>(
        &mut self,
        weather: &WeatherReport,
        rng: &mut R,
    ) -> Option<Venue> {
        let pick = recommend(weather, &self.current, &self.categories, rng);
        match &pick {
            Some(venue) => {
                tracing::info!("Recommending {} ({})", venue.name, venue.id);
                self.current = vec![venue.clone()];
            }
            None => tracing::info!("No venue to recommend in {:?} weather", weather.class),
        }
        pick
    }

    /// The most recently filtered or recommended venues.
    pub fn current_venues(&self) -> &[Venue] {
        &self.current
    }

    pub fn selected_venue_id(&self) -> i64 {
        self.selected_venue_id
    }

    pub fn set_selected_venue_id(&mut self, venue_id: i64) {
        self.selected_venue_id = venue_id;
    }

    /// Whether `city` already has a cached listing.
    pub fn is_cached(&self, city: &str) -> bool {
        self.cache.contains_key(&city.trim().to_lowercase())
    }

    async fn fetch_city(&self, code: i64) -> Result<Vec<Venue>, VenueError> {
        let code = code.to_string();
        let listing = self
            .client
            .get("/sports-places", Some(&[("cityCodes", code.as_str())]))
            .await?;
        let entries: Vec<PlaceRef> = serde_json::from_value(listing)
            .map_err(|e| VenueError::Parse(format!("sports place listing: {}", e)))?;

        let lang = [("lang", self.lang.as_str())];
        let mut venues = Vec::with_capacity(entries.len());
        for entry in entries {
            let detail = self
                .client
                .get(&format!("/sports-places/{}", entry.sports_place_id), Some(&lang))
                .await?;
            venues.push(parse_venue(self.kind, detail)?);
        }

        Ok(venues)
    }
}
