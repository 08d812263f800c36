//! Venue backend: catalog fetches and recommendations off the UI thread.
//! Results are sent back via mpsc, one message per request.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sportlocate_venues::{Venue, VenueCatalog, VenueCategory, VenueError};
use sportlocate_weather::WeatherReport;
use tokio::runtime::Handle;
use tokio::sync::Mutex;

/// Error type for venue operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueServiceError {
    /// Catalog unreachable after all retries
    Unavailable(String),
    UnknownCity(String),
    /// Catalog data could not be read
    InvalidData(String),
    /// City code table could not be loaded
    CityTable(String),
    UnsupportedKind(String),
}

impl std::fmt::Display for VenueServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenueServiceError::Unavailable(s) => write!(f, "Venue catalog unavailable: {}", s),
            VenueServiceError::UnknownCity(s) => write!(f, "Unknown city: {}", s),
            VenueServiceError::InvalidData(s) => write!(f, "Invalid venue data: {}", s),
            VenueServiceError::CityTable(s) => write!(f, "City code table error: {}", s),
            VenueServiceError::UnsupportedKind(s) => write!(f, "Unsupported venue kind: {}", s),
        }
    }
}

impl std::error::Error for VenueServiceError {}

impl From<VenueError> for VenueServiceError {
    fn from(e: VenueError) -> Self {
        match e {
            VenueError::CatalogUnavailable(s) => VenueServiceError::Unavailable(s),
            VenueError::UnknownCity(s) => VenueServiceError::UnknownCity(s),
            VenueError::Parse(s) => VenueServiceError::InvalidData(s),
            VenueError::CityTable(s) => VenueServiceError::CityTable(s),
            VenueError::UnsupportedKind(s) => VenueServiceError::UnsupportedKind(s),
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum VenueServiceMessage {
    /// Venues of a city matching the requested categories
    VenuesLoaded(Result<Vec<Venue>, VenueServiceError>),
    /// Result of a recommendation; `None` when nothing suits the weather
    RecommendationDone(Option<Venue>),
}

/// Fetch (or reuse) the venues of `city` and keep those in `categories`.
/// Sends `VenuesLoaded` on the channel when complete.
pub fn request_show_venues(
    tx: &Sender<VenueServiceMessage>,
    runtime: &Handle,
    catalog: Arc<Mutex<VenueCatalog>>,
    city: String,
    categories: Vec<VenueCategory>,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        tracing::info!("Loading venues for {} ({} categories)", city, categories.len());
        let result = catalog
            .lock()
            .await
            .filtered_venues(&city, &categories)
            .await
            .map_err(|e| {
                tracing::warn!("Venue request for {} failed: {}", city, e);
                VenueServiceError::from(e)
            });
        let _ = tx.send(VenueServiceMessage::VenuesLoaded(result));
    });
}

/// Pick a venue from the current result set that suits `weather`.
/// Sends `RecommendationDone` on the channel when complete.
pub fn request_recommendation(
    tx: &Sender<VenueServiceMessage>,
    runtime: &Handle,
    catalog: Arc<Mutex<VenueCatalog>>,
    weather: WeatherReport,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let mut catalog = catalog.lock().await;
        let mut rng = StdRng::from_entropy();
        let pick = catalog.recommendation(&weather, &mut rng);
        let _ = tx.send(VenueServiceMessage::RecommendationDone(pick));
    });
}
