//! Rating, distance and open-now filters plus distance ordering.

use crate::normalize::NormalizedPlace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceFilter {
    pub min_rating: f64,
    pub max_km: f64,
    /// When set, only places whose open-state text reads as open are kept.
    pub open_now: bool,
}

impl PlaceFilter {
    /// A `NaN` rating fails the rating comparison for any threshold.
    #[must_use]
    pub fn matches(&self, place: &NormalizedPlace) -> bool {
        place.rating >= self.min_rating
            && place.distance_km <= self.max_km
            && (!self.open_now || is_open_now(&place.open_state))
    }
}

/// Open-state text counts as open when it mentions "open" and never
/// "close", ignoring case. `"Open ⋅ Closes 10 PM"` is therefore not open.
#[must_use]
pub fn is_open_now(open_state: &str) -> bool {
    let lower = open_state.to_lowercase();
    lower.contains("open") && !lower.contains("close")
}

/// Keep places that pass `filter`, sorted by ascending distance.
///
/// The sort is stable: places at equal distance keep their upstream order.
#[must_use]
pub fn filter_and_sort(places: Vec<NormalizedPlace>, filter: &PlaceFilter) -> Vec<NormalizedPlace> {
    let mut kept: Vec<NormalizedPlace> = places
        .into_iter()
        .filter(|place| filter.matches(place))
        .collect();
    kept.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    kept
}
