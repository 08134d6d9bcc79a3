//! Place search pipeline orchestration.

use serde::{Deserialize, Serialize};

use crate::client::SerpApiClient;
use crate::error::PlacesError;
use crate::filter::filter_and_sort;
use crate::normalize::{collect_candidates, normalize_candidates, NormalizedPlace};
use crate::params::SearchParams;

/// Response body for a successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: usize,
    pub results: Vec<NormalizedPlace>,
}

impl SearchResults {
    #[must_use]
    pub fn new(results: Vec<NormalizedPlace>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// Turn one upstream payload into filtered, distance-sorted results.
///
/// 1. Merge `local_results` and `place_results`.
/// 2. Deduplicate by `title|address`, drop records without coordinates.
/// 3. Normalize fields and measure distance from the search center.
/// 4. Apply rating, distance and open-now filters; sort by distance.
#[must_use]
pub fn process_payload(payload: &serde_json::Value, params: &SearchParams) -> SearchResults {
    let candidates = collect_candidates(payload);
    let candidate_count = candidates.len();
    let normalized = normalize_candidates(candidates, params.center);
    let normalized_count = normalized.len();
    let results = filter_and_sort(normalized, &params.filter());

    tracing::debug!(
        candidates = candidate_count,
        normalized = normalized_count,
        kept = results.len(),
        "processed SerpApi payload"
    );

    SearchResults::new(results)
}

/// Run the full search for one request: upstream call, then
/// [`process_payload`].
///
/// # Errors
///
/// Returns [`PlacesError::Upstream`] when the API reports an error, and the
/// other [`PlacesError`] variants on transport or decoding failures. No
/// partial results are returned on failure.
pub async fn search_places(
    client: &SerpApiClient,
    params: &SearchParams,
) -> Result<SearchResults, PlacesError> {
    let payload = client.search(params).await?;
    Ok(process_payload(&payload, params))
}
