pub mod map_model;
pub mod weather_model;

pub use map_model::{MapEvent, MapModel, VenueRecord};
pub use weather_model::WeatherModel;
