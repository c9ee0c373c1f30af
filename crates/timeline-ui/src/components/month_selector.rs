use crate::themes::Theme;
use ratatui::text::{Line, Span};
use timeline_core::models::Month;

/// Horizontal month picker listing exactly the months in the timeline.
///
/// The selected month is highlighted; any month not in `months` is never
/// shown, so the picker can only point at data that exists.
pub struct MonthSelector<'a> {
    /// Months present, ascending.
    pub months: &'a [Month],
    pub selected: Option<Month>,
    pub theme: &'a Theme,
}

impl<'a> MonthSelector<'a> {
    pub fn new(months: &'a [Month], selected: Option<Month>, theme: &'a Theme) -> Self {
        Self {
            months,
            selected,
            theme,
        }
    }

    /// Render as a single line: `Month: Jan  Feb [Mar] Apr`.
    pub fn to_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled("Month: ", self.theme.label)];

        for (i, month) in self.months.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", self.theme.separator));
            }
            let span = if Some(*month) == self.selected {
                Span::styled(format!("[{}]", month.label()), self.theme.selector_highlight)
            } else {
                Span::styled(format!(" {} ", month.label()), self.theme.selector)
            };
            spans.push(span);
        }

        spans.push(Span::styled("   ←/→ change month", self.theme.dim));
        Line::from(spans)
    }
}
