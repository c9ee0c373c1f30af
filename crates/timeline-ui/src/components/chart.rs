//! Line chart of the monthly averages.

use ratatui::{
    layout::Rect,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use timeline_core::formatting::format_number;
use timeline_core::models::{Month, MonthStat};

use crate::themes::Theme;

/// One plotted point: a month label and its average.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub month: Month,
    pub label: &'static str,
    pub value: f64,
}

/// Project the timeline onto chart points, one per present month, in
/// timeline order.
pub fn chart_points(timeline: &[MonthStat]) -> Vec<ChartPoint> {
    timeline
        .iter()
        .map(|m| ChartPoint {
            month: m.month,
            label: m.month.label(),
            value: m.avg,
        })
        .collect()
}

/// Value bounds for the y axis with a little headroom; a flat series gets a
/// unit band around its value.
fn y_bounds(points: &[ChartPoint]) -> [f64; 2] {
    let lo = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = if hi > lo { (hi - lo) * 0.1 } else { 1.0 };
    [lo - pad, hi + pad]
}

/// Render the series into `area`, marking `selected` with a dot.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    points: &[ChartPoint],
    selected: Option<Month>,
    metric: &str,
    theme: &Theme,
) {
    // x is the index in the series, so gaps between months are not drawn to scale.
    let series: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let marker: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| Some(p.month) == selected)
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let (x_bounds, x_labels) = if points.len() > 1 {
        (
            [0.0, (points.len() - 1) as f64],
            points
                .iter()
                .map(|p| Span::styled(p.label, theme.chart_axis))
                .collect::<Vec<_>>(),
        )
    } else {
        // A single point sits centred between two blank ticks.
        (
            [-1.0, 1.0],
            vec![
                Span::raw(""),
                Span::styled(points.first().map_or("", |p| p.label), theme.chart_axis),
                Span::raw(""),
            ],
        )
    };

    let y = y_bounds(points);
    let y_labels = vec![
        Span::styled(format_number(y[0], 1), theme.chart_axis),
        Span::styled(format_number((y[0] + y[1]) / 2.0, 1), theme.chart_axis),
        Span::styled(format_number(y[1], 1), theme.chart_axis),
    ];

    let datasets = vec![
        Dataset::default()
            .name("Average complexity")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&series),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.chart_marker)
            .data(&marker),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.separator)
                .title(" Monthly average "),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Month", theme.label))
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(format!("Avg {metric}"), theme.label))
                .style(theme.chart_axis)
                .bounds(y)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
