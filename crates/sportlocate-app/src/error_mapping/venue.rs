use crate::services::VenueServiceError;
use sportlocate_core::{AppError, CatalogError};

impl From<VenueServiceError> for AppError {
    fn from(e: VenueServiceError) -> Self {
        match e {
            VenueServiceError::Unavailable(s) => AppError::Catalog(CatalogError::Unavailable(s)),
            VenueServiceError::UnknownCity(s) => AppError::Catalog(CatalogError::UnknownCity(s)),
            VenueServiceError::InvalidData(s) => AppError::Catalog(CatalogError::InvalidData(s)),
            VenueServiceError::CityTable(s) => AppError::Catalog(CatalogError::CityTable(s)),
            VenueServiceError::UnsupportedKind(s) => {
                AppError::Catalog(CatalogError::UnsupportedKind(s))
            }
        }
    }
}
