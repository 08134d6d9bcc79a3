//! `search` command: the server's search pipeline, run once from the terminal.

use brewfind_places::{search_places, PlacesError, SearchParams, SerpApiClient};
use clap::Args;

/// Flags mirror the `/api/coffee` query parameters. Values stay strings so
/// they go through the same parse-or-default rules as HTTP requests.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query (default "coffee shop")
    #[arg(long)]
    pub q: Option<String>,
    /// Center latitude (default 10.776)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,
    /// Center longitude (default 106.700)
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,
    /// Map zoom level (default 14)
    #[arg(long)]
    pub zoom: Option<String>,
    /// Minimum rating to keep (default 0)
    #[arg(long)]
    pub min_rating: Option<String>,
    /// Maximum distance from the center in km (default 2)
    #[arg(long)]
    pub max_km: Option<String>,
    /// Keep only places currently reported open
    #[arg(long)]
    pub open_now: bool,
    /// Interface language code (default "vi")
    #[arg(long)]
    pub hl: Option<String>,
    /// Region code (default "vn")
    #[arg(long)]
    pub gl: Option<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl SearchArgs {
    /// Look up a flag by its HTTP parameter name.
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "q" => self.q.clone(),
            "lat" => self.lat.clone(),
            "lng" => self.lng.clone(),
            "zoom" => self.zoom.clone(),
            "min_rating" => self.min_rating.clone(),
            "max_km" => self.max_km.clone(),
            "open_now" => self.open_now.then(|| "true".to_string()),
            "hl" => self.hl.clone(),
            "gl" => self.gl.clone(),
            _ => None,
        }
    }

    pub fn to_params(&self) -> SearchParams {
        SearchParams::from_lookup(|key| self.lookup(key))
    }
}

/// Run one search and print `{count, results}` to stdout.
///
/// Unlike the server, the CLI refuses to run without an upstream key.
///
/// # Errors
///
/// Returns an error if the key is missing, the client cannot be built, or
/// the search fails (upstream-reported errors included).
pub(crate) async fn run_search(
    config: &brewfind_core::AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    brewfind_core::check_upstream_key(config)?;

    let client = SerpApiClient::with_base_url(
        config.upstream_key(),
        config.upstream_timeout_secs,
        &config.upstream_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build SerpApi client: {e}"))?;

    let params = args.to_params();
    let results = match search_places(&client, &params).await {
        Ok(results) => results,
        Err(PlacesError::Upstream(value)) => {
            anyhow::bail!("SerpApi rejected the search: {value}")
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(q = %params.query, count = results.count, "search completed");

    let output = if args.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{output}");
    Ok(())
}
