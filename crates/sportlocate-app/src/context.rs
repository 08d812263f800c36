//! Application context: the single instances of every service, created once
//! at startup and shared with background requests.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use sportlocate_core::{ApiClient, ClientOptions, Config, Preferences};
use sportlocate_venues::{
    CategoryDirectory, CityCodes, CityEntry, VenueCatalog, VenueCategory, VenueKind,
};
use sportlocate_weather::{Geocoder, WeatherProvider, WeatherReport};
use tokio::runtime::{Handle, Runtime};

use crate::services::{self, VenueServiceMessage, WeatherServiceMessage};

pub struct AppContext {
    runtime: Runtime,
    config: Arc<Config>,
    catalog: Arc<tokio::sync::Mutex<VenueCatalog>>,
    categories: Arc<CategoryDirectory>,
    cities: Vec<CityEntry>,
    preferences: Arc<Mutex<Preferences>>,
    weather: Arc<WeatherProvider>,
}

impl AppContext {
    /// Build the context, reading the city code table named in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let city_codes = CityCodes::from_csv_path(&config.data.city_codes_path)
            .context("Failed to load city code table")?;
        Self::with_city_codes(config, city_codes)
    }

    /// Build the context around an already loaded city code table.
    ///
    /// Blocks while the category directory is fetched.
    pub fn with_city_codes(config: Config, city_codes: CityCodes) -> Result<Self> {
        let validation = config.validate();
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        if !validation.is_valid() {
            anyhow::bail!("Invalid configuration: {}", validation.error_summary());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("sportlocate-worker")
            .build()
            .context("Failed to create tokio runtime")?;

        let retry = config.retry.to_retry_config();
        let catalog_client = ApiClient::with_options(
            &config.catalog.base_url,
            retry.clone(),
            ClientOptions {
                timeout: Duration::from_secs(config.catalog.timeout_secs),
                ..ClientOptions::default()
            },
        )?;
        let weather_client = ApiClient::with_options(
            &config.weather.base_url,
            retry.clone(),
            ClientOptions {
                timeout: Duration::from_secs(config.weather.timeout_secs),
                ..ClientOptions::default()
            },
        )?;
        let geocode_client = ApiClient::with_options(
            &config.geocode.base_url,
            retry,
            ClientOptions {
                user_agent: config.geocode.user_agent.clone(),
                ..ClientOptions::default()
            },
        )?;

        let kind: VenueKind = config.catalog.venue_kind.parse()?;
        let categories = Arc::new(
            runtime.block_on(CategoryDirectory::load(&catalog_client, &config.catalog.lang)),
        );
        let cities = city_codes.cities();
        let catalog = VenueCatalog::new(
            catalog_client,
            config.catalog.lang.clone(),
            kind,
            city_codes,
            Arc::clone(&categories),
        );

        let preferences = Preferences::load(&config.data.preferences_path)?;
        let weather = WeatherProvider::new(weather_client, Geocoder::new(geocode_client));

        tracing::info!(
            "App context ready: {} cities, {} categories, current city {}",
            cities.len(),
            categories.all().len(),
            preferences.current_city()
        );

        Ok(Self {
            runtime,
            config: Arc::new(config),
            catalog: Arc::new(tokio::sync::Mutex::new(catalog)),
            categories,
            cities,
            preferences: Arc::new(Mutex::new(preferences)),
            weather: Arc::new(weather),
        })
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn runtime(&self) -> &Handle {
        self.runtime.handle()
    }

    pub fn catalog(&self) -> &Arc<tokio::sync::Mutex<VenueCatalog>> {
        &self.catalog
    }

    pub fn categories(&self) -> &Arc<CategoryDirectory> {
        &self.categories
    }

    pub fn preferences(&self) -> &Arc<Mutex<Preferences>> {
        &self.preferences
    }

    /// Categories the user has not hidden, in directory order.
    pub fn accepted_categories(&self) -> Vec<VenueCategory> {
        let prefs = self.preferences.lock();
        prefs
            .accepted(self.categories.all(), |c| c.name.as_str())
            .into_iter()
            .cloned()
            .collect()
    }

    /// `(name, enabled)` for every category, for a preferences view.
    pub fn category_states(&self) -> Vec<(String, bool)> {
        self.preferences
            .lock()
            .category_states(self.categories.all().iter().map(|c| c.name.as_str()))
    }

    pub fn set_category_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        self.preferences.lock().set_category_enabled(name, enabled)?;
        Ok(())
    }

    pub fn current_city(&self) -> String {
        self.preferences.lock().current_city().to_string()
    }

    pub fn set_city(&self, city: &str) -> Result<()> {
        self.preferences.lock().set_city(city)?;
        Ok(())
    }

    /// Select a venue; `-1` clears the selection.
    ///
    /// Must not be called from inside the runtime.
    pub fn select_venue(&self, venue_id: i64) {
        tracing::debug!("Selecting venue {}", venue_id);
        self.catalog.blocking_lock().set_selected_venue_id(venue_id);
    }

    pub fn selected_venue_id(&self) -> i64 {
        self.catalog.blocking_lock().selected_venue_id()
    }

    /// All known cities for a city picker.
    pub fn cities(&self) -> &[CityEntry] {
        &self.cities
    }

    /// Show the accepted categories' venues of the current city.
    pub fn request_show_venues(&self, tx: &Sender<VenueServiceMessage>) {
        services::request_show_venues(
            tx,
            self.runtime(),
            Arc::clone(&self.catalog),
            self.current_city(),
            self.accepted_categories(),
        );
    }

    /// Recommend one of the venues currently shown.
    pub fn request_recommendation(
        &self,
        tx: &Sender<VenueServiceMessage>,
        weather: WeatherReport,
    ) {
        services::request_recommendation(tx, self.runtime(), Arc::clone(&self.catalog), weather);
    }

    /// Fetch the current weather of the current city.
    pub fn request_weather(&self, tx: &Sender<WeatherServiceMessage>) {
        services::request_weather_fetch(
            tx,
            self.runtime(),
            Arc::clone(&self.weather),
            self.current_city(),
        );
    }
}
