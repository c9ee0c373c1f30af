//! Monthly aggregation of normalized records.
//!
//! One streaming pass folds every record into a per-month accumulator; the
//! accumulators then become [`MonthStat`]s in ascending month order.

use std::collections::BTreeMap;

use timeline_core::models::{Month, MonthStat, ParsedRecord};

// ── MonthAccumulator ──────────────────────────────────────────────────────────

/// Running sum, count and extremes for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthAccumulator {
    pub sum: f64,
    pub count: u32,
    pub min: f64,
    pub max: f64,
}

impl MonthAccumulator {
    /// Start an accumulator from the month's first value.
    pub fn new(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            min: value,
            max: value,
        }
    }

    /// Fold another value into the running totals.
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Close the accumulator into a [`MonthStat`].
    ///
    /// The mean is clamped into `[min, max]` so float drift in the sum can
    /// never break `min <= avg <= max`.
    pub fn finish(self, month: Month) -> MonthStat {
        let avg = (self.sum / f64::from(self.count)).clamp(self.min, self.max);
        MonthStat {
            month,
            avg,
            min: self.min,
            max: self.max,
            count: self.count,
        }
    }
}

// ── TimelineTotals ────────────────────────────────────────────────────────────

/// Figures spanning every month of a timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineTotals {
    /// Total number of records across all months.
    pub count: u32,
    /// Smallest value seen in any month.
    pub min: Option<f64>,
    /// Largest value seen in any month.
    pub max: Option<f64>,
    /// Record-weighted mean, see [`MonthlyAggregator::global_average`].
    pub average: Option<f64>,
}

// ── MonthlyAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups records by calendar month.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Aggregate `records` (any order) into one [`MonthStat`] per month
    /// present, strictly ascending by month. Empty input yields an empty
    /// timeline.
    pub fn aggregate_monthly(records: &[ParsedRecord]) -> Vec<MonthStat> {
        // BTreeMap keeps the months sorted as we go.
        let mut map: BTreeMap<Month, MonthAccumulator> = BTreeMap::new();

        for record in records {
            map.entry(record.month)
                .and_modify(|acc| acc.add(record.value))
                .or_insert_with(|| MonthAccumulator::new(record.value));
        }

        map.into_iter()
            .map(|(month, acc)| acc.finish(month))
            .collect()
    }

    /// Record-weighted mean of the monthly averages:
    /// `Σ(avg × count) / Σ(count)`.
    ///
    /// Returns `None` for an empty timeline.
    pub fn global_average(timeline: &[MonthStat]) -> Option<f64> {
        let total_count: u64 = timeline.iter().map(|m| u64::from(m.count)).sum();
        if total_count == 0 {
            return None;
        }
        let weighted_sum: f64 = timeline.iter().map(|m| m.avg * f64::from(m.count)).sum();
        let average = weighted_sum / total_count as f64;

        let (lo, hi) = Self::extremes(timeline)?;
        Some(average.clamp(lo, hi))
    }

    /// Sum up the whole timeline into a single [`TimelineTotals`].
    pub fn calculate_totals(timeline: &[MonthStat]) -> TimelineTotals {
        let extremes = Self::extremes(timeline);
        TimelineTotals {
            count: timeline.iter().map(|m| m.count).sum(),
            min: extremes.map(|(lo, _)| lo),
            max: extremes.map(|(_, hi)| hi),
            average: Self::global_average(timeline),
        }
    }

    /// Smallest monthly minimum and largest monthly maximum.
    fn extremes(timeline: &[MonthStat]) -> Option<(f64, f64)> {
        let first = timeline.first()?;
        Some(timeline.iter().fold((first.min, first.max), |(lo, hi), m| {
            (lo.min(m.min), hi.max(m.max))
        }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
