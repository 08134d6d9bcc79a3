//! Inbound search parameters with their defaults.
//!
//! Every parameter arrives as an optional string. Numeric values are parsed
//! explicitly; a value that fails to parse (or parses to a non-finite
//! number) falls back to its default instead of propagating.

use serde::Serialize;

use crate::filter::PlaceFilter;
use crate::geo::LatLng;

pub const DEFAULT_QUERY: &str = "coffee shop";
pub const DEFAULT_LAT: f64 = 10.776;
pub const DEFAULT_LNG: f64 = 106.700;
pub const DEFAULT_ZOOM: f64 = 14.0;
pub const DEFAULT_MIN_RATING: f64 = 0.0;
pub const DEFAULT_MAX_KM: f64 = 2.0;
pub const DEFAULT_LANGUAGE: &str = "vi";
pub const DEFAULT_REGION: &str = "vn";

/// One search request, fully resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchParams {
    pub query: String,
    pub center: LatLng,
    pub zoom: f64,
    pub min_rating: f64,
    pub max_km: f64,
    pub open_now: bool,
    /// Interface language (`hl`).
    pub language: String,
    /// Result region (`gl`).
    pub region: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            center: LatLng::new(DEFAULT_LAT, DEFAULT_LNG),
            zoom: DEFAULT_ZOOM,
            min_rating: DEFAULT_MIN_RATING,
            max_km: DEFAULT_MAX_KM,
            open_now: false,
            language: DEFAULT_LANGUAGE.to_string(),
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl SearchParams {
    /// Resolve parameters by their wire names (`q`, `lat`, `lng`, `zoom`,
    /// `min_rating`, `max_km`, `open_now`, `hl`, `gl`).
    ///
    /// Decoupled from any HTTP framework so the server's query map and the
    /// CLI's flags share the same defaulting rules.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number =
            |name: &str, default: f64| parse_number(name, lookup(name).as_deref(), default);

        Self {
            query: lookup("q").unwrap_or(defaults.query),
            center: LatLng::new(
                number("lat", defaults.center.lat),
                number("lng", defaults.center.lng),
            ),
            zoom: number("zoom", defaults.zoom),
            min_rating: number("min_rating", defaults.min_rating),
            max_km: number("max_km", defaults.max_km),
            open_now: lookup("open_now").is_some_and(|raw| raw == "true"),
            language: lookup("hl").unwrap_or(defaults.language),
            region: lookup("gl").unwrap_or(defaults.region),
        }
    }

    /// Compound `ll` token understood by the Google Maps engine:
    /// `@<lat>,<lng>,<zoom>z`.
    #[must_use]
    pub fn location_token(&self) -> String {
        format!("@{},{},{}z", self.center.lat, self.center.lng, self.zoom)
    }

    #[must_use]
    pub fn filter(&self) -> PlaceFilter {
        PlaceFilter {
            min_rating: self.min_rating,
            max_km: self.max_km,
            open_now: self.open_now,
        }
    }
}

fn parse_number(name: &str, raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            tracing::debug!(
                param = name,
                raw,
                default,
                "unparseable search parameter, using default"
            );
            default
        }
    }
}
