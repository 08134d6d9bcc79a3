mod search;

use brewfind_core::{AppConfig, LogFormat};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "brewfind-cli", version)]
#[command(about = "Search nearby places from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one place search and print the JSON result
    Search(SearchArgs),
    /// Print the resolved configuration (secrets redacted)
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` and usage errors never depend on the environment.
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = brewfind_core::load_app_config()?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args).await?,
        Commands::Config => {
            println!("{config:#?}");
            match brewfind_core::check_upstream_key(&config) {
                Ok(()) => println!("upstream key: configured"),
                Err(e) => println!("upstream key: {e}"),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean JSON for piping.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
    Ok(())
}
