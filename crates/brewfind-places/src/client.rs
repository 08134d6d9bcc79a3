//! HTTP client for the `SerpApi` Google Maps search endpoint.
//!
//! Wraps `reqwest` with the request shape the `google_maps` engine expects
//! and the API's error convention: failures are reported through an `error`
//! field in the JSON body (often with a 4xx status), so the body is decoded
//! regardless of status and the `error` field decides.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::fields::is_truthy;
use crate::params::SearchParams;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const SEARCH_PATH: &str = "search.json";
const ENGINE: &str = "google_maps";
const SEARCH_TYPE: &str = "search";

/// Client for the `SerpApi` search endpoint.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
    search_url: Url,
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("search_url", &self.search_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SerpApiClient {
    /// Creates a new client pointed at the production `SerpApi` endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// A `None` or blank key is accepted: the request is still sent without
    /// `api_key` and the upstream reports the failure.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("brewfind/0.1 (place-search)")
            .build()?;

        // Ensure exactly one trailing slash so the join appends the search
        // path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ToOwned::to_owned);

        Ok(Self {
            client,
            api_key,
            search_url,
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one place search and returns the raw JSON payload.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Upstream`] if the payload carries an `error` field.
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the body is not valid JSON.
    /// - [`PlacesError::UnexpectedPayload`] if the body is JSON but not an
    ///   object (`null`, an array, a bare scalar).
    pub async fn search(&self, params: &SearchParams) -> Result<serde_json::Value, PlacesError> {
        let url = self.build_url(params);
        tracing::debug!(
            q = %params.query,
            ll = %params.location_token(),
            hl = %params.language,
            gl = %params.region,
            api_key_present = self.api_key.is_some(),
            "sending SerpApi place search"
        );

        let body = self.request_json(&url, &params.query).await?;
        Self::check_api_error(&body)?;
        Ok(body)
    }

    /// Builds the search URL with percent-encoded query parameters.
    fn build_url(&self, params: &SearchParams) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", ENGINE);
            pairs.append_pair("type", SEARCH_TYPE);
            pairs.append_pair("q", &params.query);
            pairs.append_pair("ll", &params.location_token());
            pairs.append_pair("hl", &params.language);
            pairs.append_pair("gl", &params.region);
            if let Some(key) = &self.api_key {
                pairs.append_pair("api_key", key);
            }
        }
        url
    }

    /// Sends a GET request and parses the body as JSON without consulting the
    /// HTTP status.
    ///
    /// Transport errors have their URL stripped since it carries the API key.
    async fn request_json(&self, url: &Url, query: &str) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%status, error = %e, "SerpApi returned a non-JSON body");
            PlacesError::Deserialize {
                context: format!("SerpApi search (q={query}, status={status})"),
                source: e,
            }
        })
    }

    /// Rejects non-object bodies and returns the upstream `error` value when
    /// one is set.
    fn check_api_error(body: &serde_json::Value) -> Result<(), PlacesError> {
        if !body.is_object() {
            let kind = json_kind(body);
            tracing::warn!(kind, "SerpApi returned a non-object payload");
            return Err(PlacesError::UnexpectedPayload { kind });
        }
        match body.get("error") {
            Some(error) if is_truthy(error) => {
                tracing::warn!(error = %error, "SerpApi reported an error");
                Err(PlacesError::Upstream(error.clone()))
            }
            _ => Ok(()),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
