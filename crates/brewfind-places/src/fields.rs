//! Field-fallback accessors over untyped upstream place records.
//!
//! `SerpApi` returns the same logical attribute under different keys
//! depending on which result list a record came from. Each attribute is
//! resolved by walking an ordered key list and taking the first value that
//! is *present*: a non-empty string, a non-zero number, or `true`. Null,
//! empty, zero, `false`, arrays and objects are skipped.

use serde_json::{Map, Value};

use crate::geo::LatLng;

/// One upstream place record.
pub type Candidate = Map<String, Value>;

pub const TITLE_KEYS: &[&str] = &["title"];
pub const RATING_KEYS: &[&str] = &["rating", "stars"];
pub const ADDRESS_KEYS: &[&str] = &["address", "full_address", "sub_title"];
pub const PHONE_KEYS: &[&str] = &["phone", "phone_number"];
pub const WEBSITE_KEYS: &[&str] = &["website", "link", "google_maps_url"];
pub const OPEN_STATE_KEYS: &[&str] = &["open_state", "hours"];

const GPS_KEY: &str = "gps_coordinates";

/// Returns `true` for values that count as set, in the loose sense the
/// upstream uses (`""`, `0`, `false` and `null` are all "unset").
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_present_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_)) && is_truthy(value)
}

/// First present scalar value among `keys`, in order.
#[must_use]
pub fn first_present<'a>(candidate: &'a Candidate, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| candidate.get(*key))
        .find(|value| is_present_scalar(value))
}

/// Resolve a text attribute. Numbers and booleans are rendered as text.
#[must_use]
pub fn text_field(candidate: &Candidate, keys: &[&str]) -> Option<String> {
    first_present(candidate, keys).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Resolve a numeric attribute. Numeric strings such as `"4.5"` are parsed;
/// anything that does not yield a finite number resolves to `None`.
#[must_use]
pub fn number_field(candidate: &Candidate, keys: &[&str]) -> Option<f64> {
    first_present(candidate, keys).and_then(value_as_f64)
}

/// Resolve the rating: `0.0` when no rating key is present, `NaN` when the
/// first present value is not numeric. No rating threshold accepts `NaN`,
/// so such a place never survives filtering.
#[must_use]
pub fn rating(candidate: &Candidate) -> f64 {
    first_present(candidate, RATING_KEYS)
        .map_or(0.0, |value| value_as_f64(value).unwrap_or(f64::NAN))
}

/// Resolve the `gps_coordinates` pair. Both `latitude` and `longitude` must
/// be finite numbers (or numeric strings).
#[must_use]
pub fn coordinates(candidate: &Candidate) -> Option<LatLng> {
    let gps = candidate.get(GPS_KEY)?.as_object()?;
    let lat = gps.get("latitude").and_then(value_as_f64)?;
    let lng = gps.get("longitude").and_then(value_as_f64)?;
    Some(LatLng::new(lat, lng))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(true) => Some(1.0),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn candidate(value: Value) -> Candidate {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn text_field_takes_first_present_key() {
        let c = candidate(json!({ "full_address": "12 Le Loi", "sub_title": "District 1" }));
        assert_eq!(
            text_field(&c, ADDRESS_KEYS).as_deref(),
            Some("12 Le Loi")
        );
    }

    #[test]
    fn text_field_skips_empty_and_null_values() {
        let c = candidate(json!({ "address": "", "full_address": null, "sub_title": "Ben Thanh" }));
        assert_eq!(
            text_field(&c, ADDRESS_KEYS).as_deref(),
            Some("Ben Thanh")
        );
    }

    #[test]
    fn text_field_skips_structured_values() {
        let c = candidate(json!({ "open_state": ["Open"], "hours": "Open 24 hours" }));
        assert_eq!(
            text_field(&c, OPEN_STATE_KEYS).as_deref(),
            Some("Open 24 hours")
        );
    }

    #[test]
    fn text_field_renders_numbers() {
        let c = candidate(json!({ "phone_number": 2_838_123_456_u64 }));
        assert_eq!(
            text_field(&c, PHONE_KEYS).as_deref(),
            Some("2838123456")
        );
    }

    #[test]
    fn text_field_returns_none_when_nothing_matches() {
        let c = candidate(json!({ "title": "Cong Caphe" }));
        assert_eq!(text_field(&c, WEBSITE_KEYS), None);
    }

    #[test]
    fn number_field_falls_back_from_zero_rating_to_stars() {
        let c = candidate(json!({ "rating": 0, "stars": 4.2 }));
        assert_eq!(number_field(&c, RATING_KEYS), Some(4.2));
    }

    #[test]
    fn number_field_parses_numeric_strings() {
        let c = candidate(json!({ "rating": "4.5" }));
        assert_eq!(number_field(&c, RATING_KEYS), Some(4.5));
    }

    #[test]
    fn number_field_rejects_garbage_strings() {
        let c = candidate(json!({ "rating": "five stars" }));
        assert_eq!(number_field(&c, RATING_KEYS), None);
    }

    #[test]
    fn rating_defaults_to_zero_when_absent() {
        let c = candidate(json!({ "title": "No rating", "rating": null }));
        assert!(rating(&c).abs() < f64::EPSILON);
    }

    #[test]
    fn rating_is_nan_when_present_but_not_numeric() {
        let c = candidate(json!({ "rating": "n/a", "stars": 4.0 }));
        assert!(rating(&c).is_nan());
    }

    #[test]
    fn rating_uses_stars_when_rating_is_zero() {
        let c = candidate(json!({ "rating": 0, "stars": "3.5" }));
        assert!((rating(&c) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinates_require_both_components() {
        let c = candidate(json!({ "gps_coordinates": { "latitude": 10.77 } }));
        assert_eq!(coordinates(&c), None);
    }

    #[test]
    fn coordinates_extracts_pair() {
        let c = candidate(json!({
            "gps_coordinates": { "latitude": 10.779, "longitude": 106.699 }
        }));
        assert_eq!(coordinates(&c), Some(LatLng::new(10.779, 106.699)));
    }

    #[test]
    fn coordinates_ignore_non_object_gps() {
        let c = candidate(json!({ "gps_coordinates": "10.77,106.70" }));
        assert_eq!(coordinates(&c), None);
    }

    #[test]
    fn truthiness_matches_loose_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }
}
