use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Display labels for the twelve calendar months, indexed by `month - 1`.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month in the range `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Month(u8);

impl Month {
    /// Build a month from its number. Returns `None` outside `1..=12`.
    pub fn new(number: u32) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Month(number as u8))
        } else {
            None
        }
    }

    /// Month number, `1..=12`.
    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    /// Short display label from [`MONTH_LABELS`].
    pub fn label(self) -> &'static str {
        MONTH_LABELS[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single dynamically-typed CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// The cell was present but blank.
    Empty,
    /// The cell held a finite real number.
    Number(f64),
    /// Anything else, kept verbatim.
    Text(String),
}

impl RawValue {
    /// Type a raw cell: blank → `Empty`, finite numeric → `Number`, else `Text`.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return RawValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            _ => RawValue::Text(cell.to_string()),
        }
    }

    /// String form of the value, as it would be printed.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Empty => Cow::Borrowed(""),
            RawValue::Number(n) => Cow::Owned(n.to_string()),
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// `true` for [`RawValue::Empty`] and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Number(_) => false,
            RawValue::Text(s) => s.trim().is_empty(),
        }
    }
}

/// One untyped CSV row keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, RawValue>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of `column`, replacing any previous one.
    pub fn insert(&mut self, column: impl Into<String>, value: RawValue) {
        self.fields.insert(column.into(), value);
    }

    /// Look up the value of `column`.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.fields.get(column)
    }

    /// Number of columns present in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Everything the CSV source yields: the header plus all data rows.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<RawRow>,
}

impl RowSet {
    /// `true` when the header row names `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// A validated `(month, value)` pair derived from one source row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedRecord {
    pub month: Month,
    pub value: f64,
}

impl ParsedRecord {
    pub fn new(month: Month, value: f64) -> Self {
        Self { month, value }
    }
}

/// Summary statistics for all records falling in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStat {
    pub month: Month,
    /// Arithmetic mean of the month's values.
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Number of records that contributed; always at least 1.
    pub count: u32,
}
