//! Monthly statistics table for the timeline TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per month
//! present plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use timeline_core::formatting;
use timeline_core::models::{Month, MonthStat};
use timeline_data::aggregator::TimelineTotals;

use crate::themes::Theme;

const HEADERS: [&str; 5] = ["Month", "Average", "Min", "Max", "Texts"];

fn opt_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| formatting::format_number(v, 1))
}

/// Render the monthly table into `area`, emphasising the `selected` month.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    timeline: &[MonthStat],
    totals: &TimelineTotals,
    selected: Option<Month>,
    theme: &Theme,
) {
    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let mut rows: Vec<Row> = timeline
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let style = if Some(stat.month) == selected {
                theme.table_selected
            } else if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(stat.month.label()),
                Cell::from(formatting::format_number(stat.avg, 1)),
                Cell::from(formatting::format_number(stat.min, 1)),
                Cell::from(formatting::format_number(stat.max, 1)),
                Cell::from(formatting::format_number(f64::from(stat.count), 0)),
            ])
            .style(style)
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(opt_number(totals.average)),
            Cell::from(opt_number(totals.min)),
            Cell::from(opt_number(totals.max)),
            Cell::from(formatting::format_number(f64::from(totals.count), 0)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Monthly statistics "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when no row produced a valid record.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No dated records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the date and metric columns of the CSV file.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Complexity Timeline "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use timeline_data::aggregator::MonthlyAggregator;

    fn make_timeline() -> Vec<MonthStat> {
        vec![
            MonthStat {
                month: Month::new(1).unwrap(),
                avg: 15.0,
                min: 10.0,
                max: 20.0,
                count: 2,
            },
            MonthStat {
                month: Month::new(2).unwrap(),
                avg: 15.0,
                min: 15.0,
                max: 15.0,
                count: 1,
            },
        ]
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_opt_number() {
        assert_eq!(opt_number(None), "-");
        assert_eq!(opt_number(Some(12.34)), "12.3");
    }

    #[test]
    fn test_render_table_view_shows_months_and_totals() {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let timeline = make_timeline();
        let totals = MonthlyAggregator::calculate_totals(&timeline);

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &timeline, &totals, Month::new(1), &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Jan"));
        assert!(text.contains("Feb"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("20.0"));
    }

    #[test]
    fn test_render_table_view_empty_timeline_does_not_panic() {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let totals = TimelineTotals::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, &[], &totals, None, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_data_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("No dated records found"));
    }
}
