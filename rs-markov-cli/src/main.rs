use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rs_markov_core::model::engine::{DEFAULT_MAX_ORDER, PredictionEngine};

mod io;

/// Generate text from a character-level back-off Markov model.
#[derive(Parser)]
#[command(name = "rs-markov", version)]
struct Cli {
    /// Training corpus (plain text file)
    corpus: PathBuf,

    /// Starting prompt for generation
    prompt: Option<String>,

    /// Number of characters to generate
    #[arg(long, default_value_t = 1000)]
    length: usize,

    /// Highest context length to model
    #[arg(long, default_value_t = DEFAULT_MAX_ORDER)]
    max_order: usize,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Print per-order hit counts after generation
    #[arg(long)]
    stats: bool,

    /// Rebuild the model even if a binary cache exists
    #[arg(long)]
    no_cache: bool,
}

/// Loads the engine from the binary cache next to the corpus, or builds it
/// from the corpus text and writes the cache for the next run.
fn load_engine(cli: &Cli) -> Result<PredictionEngine> {
    let cache_path = io::build_output_path(&cli.corpus, "bin")?;

    if !cli.no_cache && cache_path.exists() {
        let bytes = fs::read(&cache_path)
            .with_context(|| format!("failed to read model cache {}", cache_path.display()))?;
        match PredictionEngine::from_bytes(&bytes) {
            Ok(engine) if engine.max_order() == cli.max_order => {
                tracing::info!(cache = %cache_path.display(), "loaded cached model");
                return Ok(engine);
            }
            Ok(_) => {
                tracing::warn!(
                    cache = %cache_path.display(),
                    "cached model has a different max order, rebuilding"
                );
            }
            Err(error) => {
                tracing::warn!(
                    cache = %cache_path.display(),
                    %error,
                    "cached model is unusable, rebuilding"
                );
            }
        }
    }

    let corpus = fs::read_to_string(&cli.corpus)
        .with_context(|| format!("failed to read corpus {}", cli.corpus.display()))?;
    let engine = PredictionEngine::build(&corpus, cli.max_order)
        .with_context(|| format!("failed to build model from {}", cli.corpus.display()))?;

    if !cli.no_cache {
        let bytes = engine.to_bytes().context("failed to encode model cache")?;
        fs::write(&cache_path, bytes)
            .with_context(|| format!("failed to write model cache {}", cache_path.display()))?;
        tracing::info!(cache = %cache_path.display(), "wrote model cache");
    }

    Ok(engine)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rs_markov=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let engine = load_engine(&cli)?;
    if let Some(seed) = cli.seed {
        engine.reseed(seed);
    }

    let mut output = cli.prompt.clone().unwrap_or_default();
    for _ in 0..cli.length {
        let next = engine.predict_next_char(&output);
        output.push(next);
    }

    // Flatten newlines so the sample reads as one line.
    let rendered: String = output
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    println!("{rendered}");

    if cli.stats {
        for (order, hits) in engine.hit_counts().iter().enumerate() {
            println!("order {order}: {hits} hits");
        }
    }

    Ok(())
}
