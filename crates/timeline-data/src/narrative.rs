//! Narrative text comparing one month against the whole period.

use std::fmt;

use timeline_core::formatting::{format_decimal, relative_percent};
use timeline_core::models::{Month, MonthStat};

/// Whether a month sits above or below the global average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative reading of a month's average against the global one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Elevated,
    Moderate,
}

impl Intensity {
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Elevated => "elevated",
            Intensity::Moderate => "moderate",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The computed pieces behind a month's narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthComparison<'a> {
    pub stat: &'a MonthStat,
    pub global_average: f64,
    /// `stat.avg - global_average`.
    pub diff: f64,
    /// `100 × diff / global_average`, or `0` when the global average is zero.
    pub percent: f64,
    pub direction: Direction,
    pub intensity: Intensity,
}

impl<'a> MonthComparison<'a> {
    /// Compare `stat` with `global_average`. Ties count as above / elevated.
    pub fn new(stat: &'a MonthStat, global_average: f64) -> Self {
        let diff = stat.avg - global_average;
        let direction = if diff >= 0.0 {
            Direction::Above
        } else {
            Direction::Below
        };
        let intensity = if stat.avg >= global_average {
            Intensity::Elevated
        } else {
            Intensity::Moderate
        };
        Self {
            stat,
            global_average,
            diff,
            percent: relative_percent(stat.avg, global_average),
            direction,
            intensity,
        }
    }

    /// Render the fixed-template sentence, naming `metric` as the unit.
    pub fn sentence(&self, metric: &str) -> String {
        let stat = self.stat;
        let texts = if stat.count == 1 { "text" } else { "texts" };
        format!(
            "In {label} the average complexity was {avg} {metric} per text, roughly {pct}% {direction} \
             the overall average for the period analysed. That month the dataset holds {count} {texts}, \
             with values ranging from {min} to {max} {metric}, indicating a more {intensity} level of \
             detail and cognitive load in the writing.",
            label = stat.month.label(),
            avg = format_decimal(stat.avg, 1),
            pct = format_decimal(self.percent.abs(), 1),
            direction = self.direction,
            count = stat.count,
            min = format_decimal(stat.min, 1),
            max = format_decimal(stat.max, 1),
            intensity = self.intensity,
        )
    }
}

/// Build the comparison for `selection`, or `None` when the selection or the
/// global average is unset, the timeline is empty, or the month is absent.
pub fn compare_month(
    selection: Option<Month>,
    timeline: &[MonthStat],
    global_average: Option<f64>,
) -> Option<MonthComparison<'_>> {
    let month = selection?;
    let global = global_average?;
    let stat = timeline.iter().find(|m| m.month == month)?;
    Some(MonthComparison::new(stat, global))
}

/// Narrative for the selected month; the empty string when any input is
/// missing.
pub fn narrate(
    selection: Option<Month>,
    timeline: &[MonthStat],
    global_average: Option<f64>,
    metric: &str,
) -> String {
    compare_month(selection, timeline, global_average)
        .map(|c| c.sentence(metric))
        .unwrap_or_default()
}
