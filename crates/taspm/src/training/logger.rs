//! Verbosity-gated training progress logging.

use std::time::Instant;

/// How much the trainer reports while boosting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Silent,
    Warning,
    Info,
    Debug,
}

/// Emits training progress through `tracing`, filtered by [`Verbosity`].
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    started: Option<Instant>,
    n_rounds: usize,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            started: None,
            n_rounds: 0,
        }
    }

    pub fn start_training(&mut self, n_rounds: usize, n_rows: usize, n_features: usize) {
        self.started = Some(Instant::now());
        self.n_rounds = n_rounds;
        if self.verbosity >= Verbosity::Info {
            tracing::info!(n_rounds, n_rows, n_features, "starting boosting");
        }
    }

    /// Per-round metrics. Logged every round at `Debug`, every tenth round and
    /// the last one at `Info`.
    pub fn log_metrics(&self, round: usize, metrics: &[(&'static str, f64)]) {
        let is_checkpoint = round % 10 == 0 || round + 1 == self.n_rounds;
        if self.verbosity >= Verbosity::Debug || (self.verbosity >= Verbosity::Info && is_checkpoint) {
            let rendered: Vec<String> = metrics
                .iter()
                .map(|(name, value)| format!("{name}={value:.6}"))
                .collect();
            tracing::info!(round, metrics = %rendered.join(" "), "boosting round");
        }
    }

    pub fn warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Warning {
            tracing::warn!("{message}");
        }
    }

    pub fn finish_training(&self, n_trees: usize) {
        if self.verbosity >= Verbosity::Info {
            let elapsed = self.started.map(|s| s.elapsed().as_secs_f64()).unwrap_or(0.0);
            tracing::info!(n_trees, elapsed_secs = elapsed, "boosting finished");
        }
    }
}
