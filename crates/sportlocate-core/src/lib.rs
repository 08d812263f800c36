pub mod api_client;
pub mod config;
pub mod error;
pub mod preferences;
pub mod retry;

pub use api_client::{ApiClient, ApiError, ClientOptions};
pub use config::{
    CatalogConfig, Config, DataConfig, GeocodeConfig, RetrySettings, ValidationResult,
    WeatherConfig,
};
pub use error::{
    AppError, CatalogError, ConfigError, NetworkError, PreferencesError, WeatherError,
};
pub use preferences::{Preferences, DEFAULT_CITY};
pub use retry::{with_retry, RetryConfig, RetryDecision, Retryable};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it twice is harmless.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    tracing::info!("Sportlocate core initialized");
    Ok(())
}
