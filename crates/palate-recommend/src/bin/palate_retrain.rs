//! One-shot retrain: rebuild the classifier from the store and report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use palate_core::config::PalateConfig;
use palate_model::ModelRegistry;
use palate_storage::StorageEngine;
use palate_training::Retrainer;

#[derive(Parser)]
#[command(name = "palate-retrain")]
#[command(about = "Rebuild the recommendation classifier from every recorded interaction")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./palate.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database path, overriding the config file
    #[arg(long, env = "PALATE_DB_PATH")]
    db_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PalateConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(db_path) = cli.db_path {
        config.storage.db_path = db_path;
    }
    palate_observability::init_tracing();

    let store = StorageEngine::open_from_config(&config.storage)
        .with_context(|| format!("opening store at {}", config.storage.db_path.display()))?;
    let retrainer = Retrainer::from_config(Arc::new(store), Arc::new(ModelRegistry::new()), &config);

    let outcome = retrainer.retrain_now().context("retraining")?;
    println!("{outcome}");
    Ok(())
}
