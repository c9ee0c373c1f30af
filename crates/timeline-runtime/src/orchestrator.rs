//! Single-shot async pipeline orchestrator.
//!
//! Runs retrieval and analysis in a tokio task and delivers exactly one
//! [`PipelineOutcome`] through a `oneshot` channel, so the TUI event loop can
//! pick it up without any shared mutable state.

use std::path::PathBuf;

use timeline_core::error::TimelineError;
use timeline_data::analysis::{self, AnalysisResult};
use timeline_data::source;
use tokio::sync::{oneshot, watch};

/// What the pipeline delivers: the analysis or the error that stopped it.
pub type PipelineOutcome = Result<AnalysisResult, TimelineError>;

// ── PipelineOrchestrator ──────────────────────────────────────────────────────

/// Loads one CSV source and analyses one metric column.
///
/// Call [`PipelineOrchestrator::start`] to run in the background, or
/// [`PipelineOrchestrator::run`] to await the outcome directly.
#[derive(Debug, Clone)]
pub struct PipelineOrchestrator {
    /// CSV file to read.
    source: PathBuf,
    /// Column holding the measurement.
    metric: String,
}

impl PipelineOrchestrator {
    pub fn new(source: impl Into<PathBuf>, metric: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            metric: metric.into(),
        }
    }

    /// Spawn the pipeline.
    ///
    /// Returns the receiver for the single outcome and a [`PipelineHandle`]
    /// that can cancel or abort the task.
    pub fn start(self) -> (oneshot::Receiver<PipelineOutcome>, PipelineHandle) {
        let (tx, rx) = oneshot::channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let outcome = self.run_until_cancelled(cancel_rx).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("pipeline receiver dropped before delivery");
            }
        });

        (
            rx,
            PipelineHandle {
                handle,
                cancel: cancel_tx,
            },
        )
    }

    /// Fetch the source, then decode and analyse it on the blocking pool.
    ///
    /// A panic in the processing stage surfaces as [`TimelineError::Aborted`].
    pub async fn run(&self) -> PipelineOutcome {
        tracing::info!("Loading {}", self.source.display());
        let bytes = source::read_source(&self.source).await?;

        let metric = self.metric.clone();
        let result = tokio::task::spawn_blocking(move || {
            let rows = source::parse_csv(bytes.as_slice())?;
            analysis::analyze(&rows, &metric)
        })
        .await
        .map_err(|e| TimelineError::Aborted(e.to_string()))??;

        tracing::info!(
            "Timeline ready: {} months from {} rows",
            result.metadata.months_present,
            result.metadata.rows_loaded
        );
        Ok(result)
    }

    async fn run_until_cancelled(&self, mut cancel: watch::Receiver<bool>) -> PipelineOutcome {
        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                tracing::debug!("pipeline cancelled");
                Err(TimelineError::Cancelled)
            }
            outcome = self.run() => outcome,
        }
    }
}

/// Await the pipeline for `source` / `metric` in the current task.
pub async fn run_once(source: impl Into<PathBuf>, metric: impl Into<String>) -> PipelineOutcome {
    PipelineOrchestrator::new(source, metric).run().await
}

/// Resolves once cancellation is requested. A dropped handle never cancels.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|requested| *requested).await.is_err() {
        std::future::pending::<()>().await;
    }
}

// ── PipelineHandle ────────────────────────────────────────────────────────────

/// A handle to the background pipeline task.
pub struct PipelineHandle {
    handle: tokio::task::JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl PipelineHandle {
    /// Ask the pipeline to stop; the receiver gets [`TimelineError::Cancelled`]
    /// unless the outcome was already delivered.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Immediately abort the task. The receiver sees a closed channel.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
