use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use content_engine::{ContentService, EngineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "word-match", version, about = "Build matching-game rounds for words")]
struct Cli {
    /// Engine configuration (TOML). Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Answer from local data only
    #[arg(long)]
    no_fallback: bool,

    /// Words to build rounds for
    #[arg(required = true)]
    words: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if cli.no_fallback {
        config.fallback.enabled = false;
    }

    let service = ContentService::from_config(&config)
        .with_context(|| format!("opening database {}", config.database.display()))?;

    for word in &cli.words {
        match service.generate(word).await {
            Some(content) => println!("{}", serde_json::to_string(&content)?),
            None => println!("{word}: not found"),
        }
    }
    Ok(())
}
