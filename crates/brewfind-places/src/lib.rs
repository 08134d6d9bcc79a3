//! Place search against the `SerpApi` Google Maps engine.
//!
//! The pipeline is: build the upstream request from [`SearchParams`], call
//! the API with [`SerpApiClient`], normalize heterogeneous candidates into
//! [`NormalizedPlace`] records, then filter and sort them by distance.

pub mod client;
pub mod error;
pub mod fields;
pub mod filter;
pub mod geo;
pub mod normalize;
pub mod params;
pub mod pipeline;

pub use client::SerpApiClient;
pub use error::PlacesError;
pub use filter::{filter_and_sort, is_open_now, PlaceFilter};
pub use geo::{haversine_km, LatLng, EARTH_RADIUS_KM};
pub use normalize::{collect_candidates, dedup_key, normalize_candidates, NormalizedPlace};
pub use params::SearchParams;
pub use pipeline::{process_payload, search_places, SearchResults};
