use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use brewfind_places::{search_places, SearchParams, SearchResults};

use crate::middleware::RequestId;

use super::{map_places_error, ApiError, AppState};

/// `GET /api/coffee`: proxy one place search to `SerpApi`.
///
/// Every query parameter is optional; see [`SearchParams::from_lookup`] for
/// names and defaults. The body is `{count, results}` on success, or
/// `{error}` with 502 (upstream-reported) or 500 (anything else).
pub(super) async fn search_coffee(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<SearchResults>, ApiError> {
    let params = SearchParams::from_lookup(|key| query.get(key).cloned());

    let results = search_places(&state.client, &params)
        .await
        .map_err(|e| map_places_error(&req_id.0, e))?;

    tracing::info!(
        request_id = %req_id.0,
        q = %params.query,
        count = results.count,
        "place search completed"
    );

    Ok(Json(results))
}
