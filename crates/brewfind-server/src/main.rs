mod api;
mod middleware;

use brewfind_core::{AppConfig, LogFormat};
use brewfind_places::SerpApiClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brewfind_core::load_app_config()?;
    init_tracing(&config)?;

    // The server keeps running without a key; every search will then fail
    // upstream and surface as a 502.
    if let Err(e) = brewfind_core::check_upstream_key(&config) {
        tracing::warn!(error = %e, "SERPAPI_KEY is missing; add it to .env");
    }

    let client = SerpApiClient::with_base_url(
        config.upstream_key(),
        config.upstream_timeout_secs,
        &config.upstream_base_url,
    )?;
    let app = build_app(AppState::new(client), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        log_format = %config.log_format,
        static_dir = %config.static_dir.display(),
        "brewfind server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// `RUST_LOG` wins over `BREWFIND_LOG_LEVEL`; the format follows
/// [`AppConfig::log_format`].
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
