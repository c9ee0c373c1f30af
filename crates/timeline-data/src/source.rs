//! CSV retrieval for the complexity timeline.
//!
//! Reads the dataset from disk asynchronously and decodes it into a
//! [`RowSet`] of dynamically typed [`RawRow`]s for the normalizer.

use std::io::Read;
use std::path::Path;

use timeline_core::error::{Result, TimelineError};
use timeline_core::models::{RawRow, RawValue, RowSet};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the raw bytes of the CSV resource at `path`.
///
/// Any I/O failure is reported as [`TimelineError::Retrieval`].
pub async fn read_source(path: &Path) -> Result<Vec<u8>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| TimelineError::Retrieval {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Decode CSV text into a [`RowSet`].
///
/// The first record is the header. Rows shorter than the header simply lack
/// the trailing columns, extra cells are ignored, and blank lines are skipped.
/// A record that cannot be decoded (e.g. invalid UTF-8) fails the whole parse.
pub fn parse_csv<R: Read>(input: R) -> Result<RowSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.as_str(), RawValue::from_cell(cell)))
            .collect();
        rows.push(row);
    }

    Ok(RowSet { headers, rows })
}

/// Read and decode the CSV resource at `path` in one step.
pub async fn fetch_rows(path: &Path) -> Result<RowSet> {
    let bytes = read_source(path).await?;
    parse_csv(bytes.as_slice())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use timeline_core::error::FailureCategory;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    // ── parse_csv ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_csv_headers_and_rows() {
        let text = "date,author,n_polysyllable_words\n2018/01/02,alice,12\n2018/02/10,bob,7.5\n";
        let set = parse_csv(text.as_bytes()).unwrap();

        assert_eq!(set.headers, vec!["date", "author", "n_polysyllable_words"]);
        assert_eq!(set.rows.len(), 2);
        assert_eq!(
            set.rows[0].get("date"),
            Some(&RawValue::Text("2018/01/02".to_string()))
        );
        assert_eq!(
            set.rows[1].get("n_polysyllable_words"),
            Some(&RawValue::Number(7.5))
        );
    }

    #[test]
    fn test_parse_csv_trims_header_whitespace() {
        let text = " date , score \n2018/01/02,3\n";
        let set = parse_csv(text.as_bytes()).unwrap();
        assert!(set.has_column("date"));
        assert!(set.has_column("score"));
    }

    #[test]
    fn test_parse_csv_empty_cell_is_empty_value() {
        let text = "date,score\n2018/01/02,\n";
        let set = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(set.rows[0].get("score"), Some(&RawValue::Empty));
    }

    #[test]
    fn test_parse_csv_short_row_lacks_trailing_columns() {
        let text = "date,author,score\n2018/01/02,alice\n";
        let set = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(set.rows.len(), 1);
        assert!(set.rows[0].get("score").is_none());
    }

    #[test]
    fn test_parse_csv_skips_blank_lines() {
        let text = "date,score\n2018/01/02,1\n\n,\n2018/01/03,2\n";
        let set = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(set.rows.len(), 2);
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let text = "date,body,score\n2018/03/01,\"hello, world\",4\n";
        let set = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(
            set.rows[0].get("body"),
            Some(&RawValue::Text("hello, world".to_string()))
        );
        assert_eq!(set.rows[0].get("score"), Some(&RawValue::Number(4.0)));
    }

    #[test]
    fn test_parse_csv_header_only() {
        let set = parse_csv("date,score\n".as_bytes()).unwrap();
        assert_eq!(set.headers.len(), 2);
        assert!(set.rows.is_empty());
    }

    #[test]
    fn test_parse_csv_invalid_utf8_is_processing_error() {
        let mut bytes = b"date,score\n2018/01/02,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let err = parse_csv(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, TimelineError::Csv(_)));
        assert_eq!(err.category(), FailureCategory::Processing);
    }

    // ── fetch_rows ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fetch_rows_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "posts.csv",
            "date,n_polysyllable_words\n2018/01/02,10\n2018/01/05,20\n",
        );

        let set = fetch_rows(&path).await.unwrap();
        assert_eq!(set.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rows_missing_file_is_retrieval_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        let err = fetch_rows(&path).await.unwrap_err();
        match &err {
            TimelineError::Retrieval { path: p, .. } => assert_eq!(p, &path),
            other => panic!("expected retrieval error, got {other:?}"),
        }
        assert_eq!(err.category(), FailureCategory::Retrieval);
    }
}
