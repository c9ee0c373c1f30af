//! Main analysis pipeline for the complexity timeline.
//!
//! Turns a decoded [`RowSet`] into monthly statistics and the global average,
//! returning an [`AnalysisResult`] ready for the UI layer.

use chrono::Utc;
use serde::Serialize;
use timeline_core::error::{Result, TimelineError};
use timeline_core::models::{Month, MonthStat, RowSet};
use tracing::debug;

use crate::aggregator::MonthlyAggregator;
use crate::narrative::{self, MonthComparison};
use crate::normalizer::{normalize_rows, DATE_COLUMN};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of data rows handed to the pipeline.
    pub rows_loaded: usize,
    /// Number of months present in the timeline.
    pub months_present: usize,
    /// Wall-clock seconds spent normalizing and aggregating.
    pub process_time_seconds: f64,
}

/// The complete output of [`analyze`].
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Column the values were read from.
    pub metric: String,
    /// One entry per month present, ascending.
    pub timeline: Vec<MonthStat>,
    /// Record-weighted mean across the timeline; `None` when it is empty.
    pub global_average: Option<f64>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Smallest month present, used as the initial selection.
    pub fn first_month(&self) -> Option<Month> {
        self.timeline.first().map(|m| m.month)
    }

    /// Months present, ascending.
    pub fn months(&self) -> Vec<Month> {
        self.timeline.iter().map(|m| m.month).collect()
    }

    pub fn stat_for(&self, month: Month) -> Option<&MonthStat> {
        self.timeline.iter().find(|m| m.month == month)
    }

    pub fn compare(&self, selection: Option<Month>) -> Option<MonthComparison<'_>> {
        narrative::compare_month(selection, &self.timeline, self.global_average)
    }

    /// Narrative for `selection`, recomputed on every call.
    pub fn narrative(&self, selection: Option<Month>) -> String {
        narrative::narrate(selection, &self.timeline, self.global_average, &self.metric)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the aggregation pipeline over `rows`, reading values from `metric`.
///
/// 1. Check that the header names the date and metric columns. A dataset
///    without data rows (including a zero-byte file) skips the check and
///    yields an empty timeline.
/// 2. Normalize rows into records (invalid rows are dropped silently).
/// 3. Aggregate by month and compute the global average.
pub fn analyze(rows: &RowSet, metric: &str) -> Result<AnalysisResult> {
    if !rows.rows.is_empty() {
        for column in [DATE_COLUMN, metric] {
            if !rows.has_column(column) {
                return Err(TimelineError::MissingColumn(column.to_string()));
            }
        }
    }

    let start = std::time::Instant::now();
    let records = normalize_rows(&rows.rows, metric);
    let timeline = MonthlyAggregator::aggregate_monthly(&records);
    let global_average = MonthlyAggregator::global_average(&timeline);
    let process_time = start.elapsed().as_secs_f64();

    debug!("Aggregated {} months for metric {}", timeline.len(), metric);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_loaded: rows.rows.len(),
        months_present: timeline.len(),
        process_time_seconds: process_time,
    };

    Ok(AnalysisResult {
        metric: metric.to_string(),
        timeline,
        global_average,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
