//! Train the production pipeline on the full balanced dataset.
//!
//! Usage:
//!   cargo run --release --bin taspm-train
//!
//! Reads `data/processed/balanced_data.csv` and writes `final_model.json`
//! in the working directory. Progress lines go to stdout; logs go to stderr,
//! filtered by `RUST_LOG`.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taspm::TrainingJob;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "taspm=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let job = TrainingJob::default();
    let (features, labels) = job
        .prepare()
        .with_context(|| format!("preparing {}", job.dataset.display()))?;

    println!("Training final model on full dataset...");
    let pipeline = job.fit(&features, &labels).context("training pipeline")?;
    println!("Training complete!");

    job.save(&pipeline)
        .with_context(|| format!("saving {}", job.artifact.display()))?;
    Ok(())
}
