use thiserror::Error;

/// Errors returned by the place search pipeline.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    ///
    /// The request URL is stripped before wrapping so the API key never
    /// reaches logs or response bodies.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream payload carried an `error` field. The value is kept
    /// verbatim so it can be relayed to the client unchanged.
    #[error("upstream error: {0}")]
    Upstream(serde_json::Value),

    /// The upstream body could not be decoded as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The upstream body was valid JSON but not an object, so it cannot
    /// carry results or an `error` field.
    #[error("unexpected upstream payload: expected a JSON object, got {kind}")]
    UnexpectedPayload { kind: &'static str },

    #[error("invalid upstream base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
