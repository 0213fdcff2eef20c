use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use symbol_builder::source::SourceCache;
use symbol_builder::{build_database, BuildConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "build-symbol-db", version, about = "Compile the symbol database from Unicode and CLDR sources")]
struct Cli {
    /// Build configuration (TOML). Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Never touch the network; every remote source must already be cached
    #[arg(long)]
    offline: bool,

    /// Output path, overriding the configured one
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BuildConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BuildConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }

    let cache = SourceCache::new(&config.cache_dir, cli.offline)
        .with_context(|| format!("opening source cache {}", config.cache_dir.display()))?;
    let database = build_database(&config, &cache).context("building symbol database")?;

    database
        .save(&config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(
        path = %config.output.display(),
        symbols = database.symbol_count(),
        names = database.name_count(),
        "Symbol database written"
    );
    Ok(())
}
