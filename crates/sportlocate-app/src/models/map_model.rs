//! Map view state: the venues on the map, the selection and the map centre.
//!
//! The view reacts to [`MapEvent`]s drained with [`MapModel::take_events`].

use serde::Serialize;
use serde_json::{json, Value};
use sportlocate_core::AppError;
use sportlocate_venues::{Coordinates, Venue, NO_SELECTION};

use crate::services::VenueServiceMessage;

/// Marker colour of the selected venue
pub const SELECTED_MARKER_COLOR: &str = "red";
/// Marker colour of every other venue
pub const MARKER_COLOR: &str = "blue";

/// One venue as shown in the venue list and detail box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueRecord {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub city_name: String,
    pub info: String,
}

impl From<&Venue> for VenueRecord {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            lat: venue.coordinates.lat,
            lon: venue.coordinates.lon,
            city_name: venue.city_name.clone(),
            info: venue.info.clone(),
        }
    }
}

impl VenueRecord {
    /// Marker tooltip text.
    pub fn tooltip(&self) -> String {
        format!(
            "{}\nCoordinates: lat {:.2}, lon {:.2}\nCity: {}\nInfo: {}",
            self.name, self.lat, self.lon, self.city_name, self.info
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    BusyChanged(bool),
    /// The venue list changed; the list view should reload
    VenuesChanged,
    /// The map needs redrawing
    MapUpdated,
    VenueSelected(i64),
    NoRecommendation,
    Error(String),
}

#[derive(Debug)]
pub struct MapModel {
    busy: bool,
    venues: Vec<VenueRecord>,
    selected_id: i64,
    recommendation_unavailable: bool,
    center: Coordinates,
    error_message: String,
    events: Vec<MapEvent>,
}

impl Default for MapModel {
    fn default() -> Self {
        Self {
            busy: false,
            venues: Vec::new(),
            selected_id: NO_SELECTION,
            recommendation_unavailable: false,
            center: Coordinates { lon: 0.0, lat: 0.0 },
            error_message: String::new(),
            events: Vec::new(),
        }
    }
}

impl MapModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn venues(&self) -> &[VenueRecord] {
        &self.venues
    }

    pub fn selected_id(&self) -> i64 {
        self.selected_id
    }

    pub fn recommendation_unavailable(&self) -> bool {
        self.recommendation_unavailable
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Mark a venue request as started.
    pub fn begin_request(&mut self) {
        self.error_message.clear();
        self.recommendation_unavailable = false;
        self.set_busy(true);
    }

    /// Apply the result of a venue service request.
    pub fn apply(&mut self, message: VenueServiceMessage) {
        match message {
            VenueServiceMessage::VenuesLoaded(Ok(venues)) => self.show_venues(&venues),
            VenueServiceMessage::VenuesLoaded(Err(e)) => {
                tracing::error!("Failed to load venues: {}", e);
                self.error_message = AppError::from(e).user_message().to_string();
                self.events.push(MapEvent::Error(self.error_message.clone()));
            }
            VenueServiceMessage::RecommendationDone(Some(venue)) => {
                self.recommendation_unavailable = false;
                self.show_venues(std::slice::from_ref(&venue));
            }
            VenueServiceMessage::RecommendationDone(None) => {
                self.recommendation_unavailable = true;
                self.events.push(MapEvent::NoRecommendation);
            }
        }
        self.set_busy(false);
    }

    /// Replace the venues on the map and centre it on their centroid.
    pub fn show_venues(&mut self, venues: &[Venue]) {
        self.venues = venues.iter().map(VenueRecord::from).collect();
        if let Some(centroid) = centroid(&self.venues) {
            self.center = centroid;
        }
        self.events.push(MapEvent::MapUpdated);
        self.events.push(MapEvent::VenuesChanged);
    }

    /// Mirror the catalog's selection and centre the map on the venue when it
    /// is shown. Feed it `AppContext::selected_venue_id` after a selection.
    ///
    /// The list itself is unchanged, so no `VenuesChanged` is emitted.
    pub fn select(&mut self, venue_id: i64) {
        self.selected_id = venue_id;
        self.events.push(MapEvent::VenueSelected(venue_id));

        if venue_id > 0 {
            if let Some(venue) = self.venues.iter().find(|v| v.id == venue_id) {
                self.center = Coordinates {
                    lon: venue.lon,
                    lat: venue.lat,
                };
            }
        } else if let Some(centroid) = centroid(&self.venues) {
            self.center = centroid;
        }
        self.events.push(MapEvent::MapUpdated);
    }

    /// Drain pending events in the order they happened.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    /// The map as a GeoJSON `FeatureCollection` of venue markers.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .venues
            .iter()
            .map(|venue| {
                let selected = venue.id == self.selected_id;
                let color = if selected {
                    SELECTED_MARKER_COLOR
                } else {
                    MARKER_COLOR
                };
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [venue.lon, venue.lat]
                    },
                    "properties": {
                        "id": venue.id,
                        "name": venue.name,
                        "selected": selected,
                        "marker-color": color,
                        "tooltip": venue.tooltip()
                    }
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "center": [self.center.lon, self.center.lat],
            "features": features
        })
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.events.push(MapEvent::BusyChanged(busy));
        }
    }
}

fn centroid(venues: &[VenueRecord]) -> Option<Coordinates> {
    if venues.is_empty() {
        return None;
    }
    let n = venues.len() as f64;
    Some(Coordinates {
        lon: venues.iter().map(|v| v.lon).sum::<f64>() / n,
        lat: venues.iter().map(|v| v.lat).sum::<f64>() / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::VenueServiceError;

    fn venue(id: i64, lon: f64, lat: f64) -> Venue {
        Venue {
            id,
            name: format!("Venue {}", id),
            coordinates: Coordinates { lon, lat },
            city_name: "Tampere".into(),
            info: "Lit".into(),
            category_code: 1120,
        }
    }

    #[test]
    fn defaults() {
        let model = MapModel::new();
        assert_eq!(model.selected_id(), -1);
        assert!(!model.busy());
        assert!(model.venues().is_empty());
        assert_eq!(model.center(), Coordinates { lon: 0.0, lat: 0.0 });
    }

    #[test]
    fn venues_centre_on_centroid() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0), venue(2, 25.0, 63.0)]);

        assert_eq!(model.center(), Coordinates { lon: 24.0, lat: 62.0 });
        assert_eq!(
            model.take_events(),
            vec![MapEvent::MapUpdated, MapEvent::VenuesChanged]
        );
    }

    #[test]
    fn empty_result_keeps_previous_centre() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0)]);
        model.show_venues(&[]);

        assert!(model.venues().is_empty());
        assert_eq!(model.center(), Coordinates { lon: 23.0, lat: 61.0 });
    }

    #[test]
    fn selection_centres_on_venue_without_list_reload() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0), venue(2, 25.0, 63.0)]);
        model.take_events();

        model.select(2);
        assert_eq!(model.selected_id(), 2);
        assert_eq!(model.center(), Coordinates { lon: 25.0, lat: 63.0 });
        assert_eq!(
            model.take_events(),
            vec![MapEvent::VenueSelected(2), MapEvent::MapUpdated]
        );
    }

    #[test]
    fn selecting_missing_venue_keeps_centre() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0)]);
        model.select(99);
        assert_eq!(model.center(), Coordinates { lon: 23.0, lat: 61.0 });
    }

    #[test]
    fn request_lifecycle_toggles_busy() {
        let mut model = MapModel::new();
        model.begin_request();
        assert!(model.busy());

        model.apply(VenueServiceMessage::VenuesLoaded(Ok(vec![venue(1, 23.0, 61.0)])));
        assert!(!model.busy());
        assert_eq!(model.venues().len(), 1);

        let events = model.take_events();
        assert_eq!(events.first(), Some(&MapEvent::BusyChanged(true)));
        assert_eq!(events.last(), Some(&MapEvent::BusyChanged(false)));
    }

    #[test]
    fn failed_load_sets_user_message() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0)]);
        model.begin_request();
        model.apply(VenueServiceMessage::VenuesLoaded(Err(
            VenueServiceError::Unavailable("503".into()),
        )));

        assert!(!model.error_message().is_empty());
        assert_eq!(model.venues().len(), 1);
        assert!(model
            .take_events()
            .iter()
            .any(|e| matches!(e, MapEvent::Error(_))));
    }

    #[test]
    fn recommendation_outcomes() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0), venue(2, 25.0, 63.0)]);

        model.apply(VenueServiceMessage::RecommendationDone(None));
        assert!(model.recommendation_unavailable());
        assert_eq!(model.venues().len(), 2);

        model.apply(VenueServiceMessage::RecommendationDone(Some(venue(2, 25.0, 63.0))));
        assert!(!model.recommendation_unavailable());
        assert_eq!(model.venues().len(), 1);
        assert_eq!(model.venues()[0].id, 2);
    }

    #[test]
    fn geojson_marks_selected_venue() {
        let mut model = MapModel::new();
        model.show_venues(&[venue(1, 23.0, 61.0), venue(2, 25.0, 63.0)]);
        model.select(1);

        let geojson = model.to_geojson();
        assert_eq!(geojson["type"], "FeatureCollection");

        let features = geojson["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["geometry"]["coordinates"], json!([23.0, 61.0]));
        assert_eq!(features[0]["properties"]["selected"], true);
        assert_eq!(features[0]["properties"]["marker-color"], "red");
        assert_eq!(features[1]["properties"]["selected"], false);

        let tooltip = features[1]["properties"]["tooltip"].as_str().unwrap();
        assert!(tooltip.starts_with("Venue 2"));
        assert!(tooltip.contains("City: Tampere"));
        assert!(tooltip.contains("lat 63.00"));
    }
}
