//! Venue catalog error types.

use sportlocate_core::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenueError {
    #[error("Venue catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Malformed catalog data: {0}")]
    Parse(String),

    #[error("City code table error: {0}")]
    CityTable(String),

    #[error("Unsupported venue kind: {0}")]
    UnsupportedKind(String),
}

impl VenueError {
    /// Whether asking again later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CatalogUnavailable(_))
    }
}

impl From<ApiError> for VenueError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Parse { .. } => Self::Parse(e.to_string()),
            other => Self::CatalogUnavailable(other.to_string()),
        }
    }
}
