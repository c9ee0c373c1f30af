use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the complexity timeline.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// The CSV resource could not be fetched from its location.
    #[error("Failed to read source {path}: {source}")]
    Retrieval {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be decoded.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a column the pipeline requires.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The processing stage stopped without producing a result.
    #[error("Processing aborted: {0}")]
    Aborted(String),

    /// The pipeline was cancelled before it delivered a result.
    #[error("Pipeline cancelled")]
    Cancelled,

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The two coarse failure states surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// The data source could not be fetched.
    Retrieval,
    /// The data was fetched but could not be turned into a timeline.
    Processing,
}

impl FailureCategory {
    /// Generic user-facing message for this category.
    pub fn message(self) -> &'static str {
        match self {
            FailureCategory::Retrieval => "Could not load the CSV file.",
            FailureCategory::Processing => "Could not process the data.",
        }
    }
}

impl TimelineError {
    /// Map this error onto one of the two user-visible failure states.
    pub fn category(&self) -> FailureCategory {
        match self {
            TimelineError::Retrieval { .. } | TimelineError::Cancelled | TimelineError::Io(_) => {
                FailureCategory::Retrieval
            }
            _ => FailureCategory::Processing,
        }
    }
}

/// Convenience alias used throughout the timeline crates.
pub type Result<T> = std::result::Result<T, TimelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_retrieval() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TimelineError::Retrieval {
            path: PathBuf::from("/data/posts.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read source"));
        assert!(msg.contains("/data/posts.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = TimelineError::MissingColumn("date".to_string());
        assert_eq!(err.to_string(), "Missing required column: date");
    }

    #[test]
    fn test_error_display_cancelled() {
        assert_eq!(TimelineError::Cancelled.to_string(), "Pipeline cancelled");
    }

    #[test]
    fn test_error_display_config() {
        let err = TimelineError::Config("empty metric name".to_string());
        assert_eq!(err.to_string(), "Configuration error: empty metric name");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TimelineError = io_err.into();
        assert!(err.to_string().contains("denied"));
        assert_eq!(err.category(), FailureCategory::Retrieval);
    }

    #[test]
    fn test_retrieval_errors_map_to_retrieval() {
        let err = TimelineError::Retrieval {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.category(), FailureCategory::Retrieval);
        assert_eq!(TimelineError::Cancelled.category(), FailureCategory::Retrieval);
    }

    #[test]
    fn test_processing_errors_map_to_processing() {
        assert_eq!(
            TimelineError::MissingColumn("date".into()).category(),
            FailureCategory::Processing
        );
        assert_eq!(
            TimelineError::Aborted("worker panicked".into()).category(),
            FailureCategory::Processing
        );
        let other: TimelineError = anyhow::anyhow!("boom").into();
        assert_eq!(other.category(), FailureCategory::Processing);
    }

    #[test]
    fn test_failure_messages_are_distinct() {
        assert_eq!(
            FailureCategory::Retrieval.message(),
            "Could not load the CSV file."
        );
        assert_eq!(
            FailureCategory::Processing.message(),
            "Could not process the data."
        );
    }
}
