//! Row normalization: untyped CSV rows into `(month, value)` records.
//!
//! Rows that cannot be normalized are dropped without a trace. Nothing here
//! logs, counts, or reports a rejected row.

use timeline_core::models::{Month, ParsedRecord, RawRow, RawValue};

/// Column holding the `YYYY/MM/DD` date of each row.
pub const DATE_COLUMN: &str = "date";

/// Normalize one row, reading the measurement from the `metric` column.
///
/// Returns `None` when:
/// - the date is missing or blank,
/// - the date has fewer than two `/`-separated segments,
/// - the second segment is not a month number in `1..=12` (so `00` is dropped),
/// - the metric is missing, blank, or not a finite number.
pub fn normalize_row(row: &RawRow, metric: &str) -> Option<ParsedRecord> {
    let date = row.get(DATE_COLUMN).filter(|v| !v.is_blank())?;
    let month = extract_month(&date.as_text())?;
    let value = metric_value(row.get(metric)?)?;
    Some(ParsedRecord::new(month, value))
}

/// Normalize every row, keeping only the valid records in input order.
pub fn normalize_rows<'a, I>(rows: I, metric: &str) -> Vec<ParsedRecord>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    rows.into_iter()
        .filter_map(|row| normalize_row(row, metric))
        .collect()
}

/// Month taken from the second `/` segment of a date string.
fn extract_month(date: &str) -> Option<Month> {
    let mut segments = date.split('/');
    let _year = segments.next()?;
    let month = segments.next()?;
    month.trim().parse::<u32>().ok().and_then(Month::new)
}

fn metric_value(value: &RawValue) -> Option<f64> {
    let n = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        RawValue::Empty => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRIC: &str = "n_polysyllable_words";

    fn row(date: RawValue, value: RawValue) -> RawRow {
        [(DATE_COLUMN, date), (METRIC, value)].into_iter().collect()
    }

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_valid_row() {
        let rec = normalize_row(&row(text("2018/03/14"), RawValue::Number(9.0)), METRIC).unwrap();
        assert_eq!(rec.month.number(), 3);
        assert_eq!(rec.value, 9.0);
    }

    #[test]
    fn test_year_only_date_rejected() {
        assert!(normalize_row(&row(text("2018"), RawValue::Number(1.0)), METRIC).is_none());
    }

    #[test]
    fn test_year_month_date_accepted() {
        let rec = normalize_row(&row(text("2018/01"), RawValue::Number(1.0)), METRIC).unwrap();
        assert_eq!(rec.month.number(), 1);
    }

    #[test]
    fn test_month_zero_rejected() {
        assert!(normalize_row(&row(text("2018/00/05"), RawValue::Number(4.0)), METRIC).is_none());
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert!(normalize_row(&row(text("2018/13/01"), RawValue::Number(4.0)), METRIC).is_none());
        assert!(normalize_row(&row(text("2018/-1/01"), RawValue::Number(4.0)), METRIC).is_none());
    }

    #[test]
    fn test_non_numeric_month_rejected() {
        assert!(normalize_row(&row(text("2018/ab/01"), RawValue::Number(4.0)), METRIC).is_none());
    }

    #[test]
    fn test_missing_or_blank_date_rejected() {
        let no_date: RawRow = [(METRIC, RawValue::Number(1.0))].into_iter().collect();
        assert!(normalize_row(&no_date, METRIC).is_none());
        assert!(normalize_row(&row(RawValue::Empty, RawValue::Number(1.0)), METRIC).is_none());
        assert!(normalize_row(&row(text("  "), RawValue::Number(1.0)), METRIC).is_none());
    }

    #[test]
    fn test_numeric_date_without_slash_rejected() {
        assert!(normalize_row(&row(RawValue::Number(2018.0), RawValue::Number(1.0)), METRIC).is_none());
    }

    #[test]
    fn test_non_numeric_metric_rejected() {
        assert!(normalize_row(&row(text("2018/01/02"), text("lots")), METRIC).is_none());
        assert!(normalize_row(&row(text("2018/01/02"), RawValue::Empty), METRIC).is_none());
        assert!(normalize_row(&row(text("2018/01/02"), text("inf")), METRIC).is_none());
    }

    #[test]
    fn test_textual_metric_parsed() {
        let rec = normalize_row(&row(text("2018/05/02"), text(" 4.25 ")), METRIC).unwrap();
        assert_eq!(rec.value, 4.25);
    }

    #[test]
    fn test_missing_metric_column_rejected() {
        let only_date: RawRow = [(DATE_COLUMN, text("2018/01/02"))].into_iter().collect();
        assert!(normalize_row(&only_date, METRIC).is_none());
    }

    #[test]
    fn test_normalization_is_pure() {
        let r = row(text("2018/07/09"), RawValue::Number(3.0));
        assert_eq!(normalize_row(&r, METRIC), normalize_row(&r, METRIC));
    }

    #[test]
    fn test_normalize_rows_filters_invalid() {
        let rows = vec![
            row(text("2018/01/02"), RawValue::Number(10.0)),
            row(text("2018"), RawValue::Number(11.0)),
            row(text("2018/00/02"), RawValue::Number(12.0)),
            row(text("2018/02/02"), text("n/a")),
            row(text("2018/02/03"), RawValue::Number(15.0)),
        ];
        let records = normalize_rows(&rows, METRIC);
        let values: Vec<f64> = records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![10.0, 15.0]);
    }
}
