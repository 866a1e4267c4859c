//! # staffdirctl
//!
//! Headless client for the employee directory: lists employees, resolves
//! photos through the on-disk cache and inspects cache keys.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use staffdir_core::config::{ConfigLoader, EndpointSelection, StaffdirConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "staffdirctl", version)]
#[command(about = "Browse the employee directory and its photo cache")]
struct Cli {
    /// Path to a staffdir.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Image cache directory (overrides config)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the directory once and print one row per employee
    List {
        /// Endpoint to load: normal, malformed or empty
        #[arg(long)]
        endpoint: Option<EndpointSelection>,

        /// Resolve each employee's photo through the cache
        #[arg(long)]
        photos: bool,

        /// Use the large photo rendition instead of the small one
        #[arg(long, requires = "photos")]
        large: bool,
    },
    /// Resolve a single photo through the cache
    Photo {
        /// Photo URL
        url: Url,
    },
    /// Print the cache key and cache file path for a photo URL
    CacheKey {
        /// Photo URL, keyed in the same normalised form `photo` uses
        url: Url,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;

    match cli.command {
        Command::List {
            endpoint,
            photos,
            large,
        } => {
            let mut config = config;
            if let Some(selection) = endpoint {
                config.selection = selection;
            }
            commands::list(&config, photos, large).await
        }
        Command::Photo { url } => commands::photo(&config, &url).await,
        Command::CacheKey { url } => commands::cache_key(&config, &url),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,staffdir_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<StaffdirConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("failed to load configuration")?;

    if let Some(path) = &config.metadata.config_path {
        tracing::debug!(path = %path.display(), "configuration file loaded");
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache.root = Some(dir.clone());
    }
    Ok(config)
}
