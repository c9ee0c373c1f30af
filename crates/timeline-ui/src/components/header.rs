use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Timeline screen header, four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Dataset badge and metric in `[ dataset | metric ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Short dataset name, usually the source file stem.
    pub dataset: &'a str,
    /// Column the averages are computed from.
    pub metric: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(dataset: &'a str, metric: &'a str, theme: &'a Theme) -> Self {
        Self {
            dataset,
            metric,
            theme,
        }
    }

    /// Render the header as exactly four lines:
    ///
    /// 1. `"✦ ✧ ✦ ✧ TEXT COMPLEXITY TIMELINE ✦ ✧ ✦ ✧"`
    /// 2. `"============================================================"`
    /// 3. `"[ dataset: addiction_2018 | n_polysyllable_words ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" TEXT COMPLEXITY TIMELINE ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ dataset: ", self.theme.label),
                Span::styled(self.dataset, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.metric, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new("addiction_2018", "n_polysyllable_words", &theme).to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new("addiction_2018", "n_polysyllable_words", &theme).to_lines();
        let title = text(&lines[0]);

        assert!(title.contains("TEXT COMPLEXITY TIMELINE"), "got: {title}");
        assert!(title.contains(SPARKLES), "got: {title}");
    }

    #[test]
    fn test_header_badge_line() {
        let theme = Theme::dark();
        let lines = Header::new("addiction_2018", "difficult_words", &theme).to_lines();
        let badge = text(&lines[2]);

        assert_eq!(badge, "[ dataset: addiction_2018 | difficult_words ]");
        assert_eq!(lines[2].spans.len(), 5);
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new("a", "b", &theme).to_lines();
        let sep = text(&lines[1]);

        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_empty_fourth_line() {
        let theme = Theme::dark();
        let lines = Header::new("a", "b", &theme).to_lines();
        assert!(text(&lines[3]).is_empty());
    }
}
