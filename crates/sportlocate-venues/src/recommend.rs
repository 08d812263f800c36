//! Weather-gated venue recommendation.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use sportlocate_weather::{WeatherClass, WeatherReport};

use crate::categories::{member_codes, CategoryDirectory};
use crate::types::Venue;

/// Venue type codes acceptable under `class`: every category in fair
/// weather, indoor categories otherwise.
pub fn admitted_codes(class: WeatherClass, directory: &CategoryDirectory) -> HashSet<i32> {
    if class.admits_all_categories() {
        member_codes(directory.all())
    } else {
        member_codes(directory.indoor())
    }
}

/// Venues of `current` that `weather` admits, in their original order.
pub fn eligible_venues<'a>(
    weather: &WeatherReport,
    current: &'a [Venue],
    directory: &CategoryDirectory,
) -> Vec<&'a Venue> {
    let admitted = admitted_codes(weather.class, directory);
    current
        .iter()
        .filter(|v| admitted.contains(&v.category_code))
        .collect()
}

/// Pick one admitted venue uniformly at random.
///
/// `None` means nothing qualifies; it is a normal outcome, not an error.
pub fn recommend<R: Rng + ?Sized>(
    weather: &WeatherReport,
    current: &[Venue],
    directory: &CategoryDirectory,
    rng: &mut R,
) -> Option<Venue> {
    let eligible = eligible_venues(weather, current, directory);
    tracing::debug!(
        "{} of {} venues eligible in {:?} weather",
        eligible.len(),
        current.len(),
        weather.class
    );
    eligible.choose(rng).map(|v| (*v).clone())
}
