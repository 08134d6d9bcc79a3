//! Normalization from raw `SerpApi` candidates to [`NormalizedPlace`].
//!
//! Field resolution is delegated to [`crate::fields`]; this module owns the
//! candidate merge, deduplication and distance computation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{
    coordinates, rating, text_field, Candidate, ADDRESS_KEYS, OPEN_STATE_KEYS, PHONE_KEYS,
    TITLE_KEYS, WEBSITE_KEYS,
};
use crate::geo::{haversine_km, LatLng};

/// Result lists merged from the upstream payload, in order.
const RESULT_FIELDS: [&str; 2] = ["local_results", "place_results"];

const UNNAMED: &str = "Unnamed";

/// Uniform output record for a single place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlace {
    pub title: String,
    /// `NaN` when the upstream rating was present but not numeric; such a
    /// place is rejected by every [`crate::PlaceFilter`].
    pub rating: f64,
    pub address: String,
    pub phone: String,
    pub website: String,
    /// Raw open/closed text as the upstream phrased it.
    pub open_state: String,
    pub location: LatLng,
    pub distance_km: f64,
}

/// Merge `local_results` and `place_results` into one candidate list.
///
/// A field that is missing or not an array contributes nothing, as do
/// array entries that are not JSON objects.
#[must_use]
pub fn collect_candidates(payload: &Value) -> Vec<&Candidate> {
    RESULT_FIELDS
        .iter()
        .filter_map(|field| payload.get(*field).and_then(Value::as_array))
        .flatten()
        .filter_map(Value::as_object)
        .collect()
}

/// Composite key used to suppress duplicate candidates: `title|address`.
#[must_use]
pub fn dedup_key(candidate: &Candidate) -> String {
    let title = text_field(candidate, TITLE_KEYS).unwrap_or_default();
    let address = text_field(candidate, ADDRESS_KEYS).unwrap_or_default();
    format!("{title}|{address}")
}

/// Normalize candidates in order, measuring distance from `center`.
///
/// The first candidate for a dedup key wins. A candidate without usable
/// coordinates is dropped, but its key still counts as seen, so a later
/// duplicate that does carry coordinates is dropped too.
pub fn normalize_candidates<'a, I>(candidates: I, center: LatLng) -> Vec<NormalizedPlace>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut places = Vec::new();

    for candidate in candidates {
        if !seen.insert(dedup_key(candidate)) {
            continue;
        }
        let Some(location) = coordinates(candidate) else {
            continue;
        };
        places.push(normalize_candidate(candidate, location, center));
    }

    places
}

fn normalize_candidate(candidate: &Candidate, location: LatLng, center: LatLng) -> NormalizedPlace {
    NormalizedPlace {
        title: text_field(candidate, TITLE_KEYS).unwrap_or_else(|| UNNAMED.to_string()),
        rating: rating(candidate),
        address: text_field(candidate, ADDRESS_KEYS).unwrap_or_default(),
        phone: text_field(candidate, PHONE_KEYS).unwrap_or_default(),
        website: text_field(candidate, WEBSITE_KEYS).unwrap_or_default(),
        open_state: text_field(candidate, OPEN_STATE_KEYS).unwrap_or_default(),
        location,
        distance_km: haversine_km(center, location),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
