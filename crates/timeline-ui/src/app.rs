//! Main application state and TUI event loop for the complexity timeline.
//!
//! [`App`] owns the theme, the load state, and the selected month. It turns
//! the single pipeline outcome into either a ready timeline or one of two
//! error banners, and drives the interactive chart screen.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::oneshot;

use timeline_core::error::{FailureCategory, TimelineError};
use timeline_core::formatting::format_number;
use timeline_core::models::Month;
use timeline_data::aggregator::MonthlyAggregator;
use timeline_data::analysis::AnalysisResult;
use timeline_runtime::orchestrator::PipelineOutcome;

use crate::components::chart::{self, chart_points};
use crate::components::header::Header;
use crate::components::month_selector::MonthSelector;
use crate::table_view;
use crate::themes::Theme;

// ── ErrorState / LoadState ────────────────────────────────────────────────────

/// The two failure screens the user can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorState {
    LoadFailed,
    ProcessingFailed,
}

impl ErrorState {
    pub fn message(self) -> &'static str {
        self.category().message()
    }

    fn category(self) -> FailureCategory {
        match self {
            ErrorState::LoadFailed => FailureCategory::Retrieval,
            ErrorState::ProcessingFailed => FailureCategory::Processing,
        }
    }
}

impl From<&TimelineError> for ErrorState {
    fn from(err: &TimelineError) -> Self {
        match err.category() {
            FailureCategory::Retrieval => ErrorState::LoadFailed,
            FailureCategory::Processing => ErrorState::ProcessingFailed,
        }
    }
}

/// Where the screen is in its one-way lifecycle.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(AnalysisResult),
    Failed(ErrorState),
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the timeline TUI.
pub struct App {
    pub theme: Theme,
    /// Dataset name shown in the header badge.
    pub dataset: String,
    /// Metric column name shown in the header and chart axis.
    pub metric: String,
    pub state: LoadState,
    /// Month the narrative describes; always one present in the timeline.
    pub selected: Option<Month>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, dataset: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            dataset: dataset.into(),
            metric: metric.into(),
            state: LoadState::Loading,
            selected: None,
            should_quit: false,
        }
    }

    // ── Outcome handling ──────────────────────────────────────────────────────

    /// Store the pipeline outcome. Only the first outcome is accepted.
    pub fn apply_outcome(&mut self, outcome: PipelineOutcome) {
        if !matches!(self.state, LoadState::Loading) {
            tracing::debug!("ignoring outcome delivered after load completed");
            return;
        }

        match outcome {
            Ok(result) => {
                self.selected = result.first_month();
                self.state = LoadState::Ready(result);
            }
            Err(err) => {
                tracing::error!("Timeline pipeline failed: {}", err);
                self.state = LoadState::Failed(ErrorState::from(&err));
            }
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            LoadState::Ready(result) => Some(result),
            _ => None,
        }
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Months the selector offers, ascending.
    pub fn months(&self) -> Vec<Month> {
        self.result().map(AnalysisResult::months).unwrap_or_default()
    }

    /// Select `month` if it is present in the timeline.
    pub fn select(&mut self, month: Month) -> bool {
        let present = self
            .result()
            .is_some_and(|r| r.stat_for(month).is_some());
        if present {
            self.selected = Some(month);
        }
        present
    }

    /// Move to the next present month, wrapping past the last.
    pub fn select_next(&mut self) {
        self.step(1);
    }

    /// Move to the previous present month, wrapping past the first.
    pub fn select_previous(&mut self) {
        self.step(-1);
    }

    pub fn select_first(&mut self) {
        if let Some(month) = self.months().first() {
            self.selected = Some(*month);
        }
    }

    pub fn select_last(&mut self) {
        if let Some(month) = self.months().last() {
            self.selected = Some(*month);
        }
    }

    fn step(&mut self, delta: isize) {
        let months = self.months();
        if months.is_empty() {
            return;
        }
        let len = months.len() as isize;
        let current = self
            .selected
            .and_then(|m| months.iter().position(|x| *x == m))
            .map_or(0, |i| i as isize);
        let next = (current + delta).rem_euclid(len) as usize;
        self.selected = Some(months[next]);
    }

    /// Narrative for the current selection, recomputed on each call.
    pub fn narrative(&self) -> String {
        self.result()
            .map(|r| r.narrative(self.selected))
            .unwrap_or_default()
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.select_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.select_previous(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            _ => {}
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive chart screen until the user quits.
    ///
    /// Polls terminal events with a 250 ms timeout and checks `rx` without
    /// blocking, so the loading banner stays responsive while the pipeline
    /// runs.
    pub async fn run(mut self, mut rx: oneshot::Receiver<PipelineOutcome>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if matches!(self.state, LoadState::Loading) {
                match rx.try_recv() {
                    Ok(outcome) => self.apply_outcome(outcome),
                    Err(oneshot::error::TryRecvError::Empty) => {}
                    Err(oneshot::error::TryRecvError::Closed) => {
                        self.apply_outcome(Err(TimelineError::Cancelled));
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(frame.area());

        let header = Header::new(&self.dataset, &self.metric, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

        match &self.state {
            LoadState::Loading => self.render_banner(frame, chunks[1], "Loading data…", false),
            LoadState::Failed(err) => self.render_banner(frame, chunks[1], err.message(), true),
            LoadState::Ready(result) if result.is_empty() => {
                table_view::render_no_data(frame, chunks[1], &self.theme);
            }
            LoadState::Ready(result) => self.render_timeline(frame, chunks[1], result),
        }
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, message: &str, is_error: bool) {
        let style = if is_error {
            self.theme.error
        } else {
            self.theme.info
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(message.to_string(), style)),
            Line::from(""),
            Line::from(Span::styled("Press 'q' or Ctrl+C to exit", self.theme.dim)),
        ];
        frame.render_widget(
            Paragraph::new(Text::from(text)).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_timeline(&self, frame: &mut Frame, area: Rect, result: &AnalysisResult) {
        let table_height = result.timeline.len() as u16 + 4;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(7),
                Constraint::Length(table_height),
            ])
            .split(area);

        let months = result.months();
        let selector = MonthSelector::new(&months, self.selected, &self.theme);
        frame.render_widget(Paragraph::new(selector.to_line()), chunks[0]);

        let points = chart_points(&result.timeline);
        chart::render_chart(
            frame,
            chunks[1],
            &points,
            self.selected,
            &self.metric,
            &self.theme,
        );

        self.render_narrative(frame, chunks[2], result);

        let totals = MonthlyAggregator::calculate_totals(&result.timeline);
        table_view::render_table_view(
            frame,
            chunks[3],
            &result.timeline,
            &totals,
            self.selected,
            &self.theme,
        );
    }

    fn render_narrative(&self, frame: &mut Frame, area: Rect, result: &AnalysisResult) {
        let mut lines = Vec::new();

        if let Some(cmp) = result.compare(self.selected) {
            let sign = if cmp.percent >= 0.0 { "+" } else { "-" };
            lines.push(Line::from(vec![
                Span::styled("Global average: ", self.theme.label),
                Span::styled(format_number(cmp.global_average, 1), self.theme.value),
                Span::styled(format!("   {}: ", cmp.stat.month), self.theme.label),
                Span::styled(format_number(cmp.stat.avg, 1), self.theme.value),
                Span::styled(
                    format!(" ({sign}{}%)", format_number(cmp.percent.abs(), 1)),
                    self.theme.direction_style(cmp.direction),
                ),
            ]));
        }
        lines.push(Line::from(Span::styled(self.narrative(), self.theme.text)));

        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.separator)
                        .title(" Analysis "),
                ),
            area,
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
