mod places;

use std::{path::Path, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use brewfind_places::{PlacesError, SerpApiClient};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SerpApiClient>,
}

impl AppState {
    pub fn new(client: SerpApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error body for the search endpoint: `{"error": <value>}`.
///
/// Upstream errors carry the upstream value verbatim (usually a string);
/// internal errors carry the error's display text.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: serde_json::Value,
}

impl ApiError {
    pub fn upstream(error: serde_json::Value) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            error,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: serde_json::Value::String(message.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    upstream_key: &'static str,
}

pub(super) fn map_places_error(request_id: &str, error: PlacesError) -> ApiError {
    match error {
        PlacesError::Upstream(value) => {
            tracing::warn!(request_id, error = %value, "upstream reported an error");
            ApiError::upstream(value)
        }
        other => {
            tracing::error!(request_id, error = %other, "place search failed");
            ApiError::internal(other.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

/// Builds the router: the search API, a health probe, and the front-end
/// directory served for every other path.
pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/coffee", get(places::search_coffee))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let upstream_key = if state.client.has_api_key() {
        "configured"
    } else {
        "missing"
    };

    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            upstream_key,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
