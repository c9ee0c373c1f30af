use clap::Parser;
use std::path::PathBuf;

/// Dataset path used when the CLI does not name one.
pub const DEFAULT_SOURCE: &str = "data/addiction_2018_features_tfidf_256.csv";

/// Column holding the complexity measurement in the default dataset.
pub const DEFAULT_METRIC: &str = "n_polysyllable_words";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Monthly text-complexity timeline for a CSV dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "complexity-timeline",
    about = "Monthly text-complexity timeline for a CSV dataset",
    version
)]
pub struct Settings {
    /// CSV file to load
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Numeric column used as the complexity metric
    #[arg(long, default_value = DEFAULT_METRIC)]
    pub metric: String,

    /// Output view
    #[arg(long, default_value = "chart", value_parser = ["chart", "summary", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::apply_debug(Settings::parse())
    }

    /// Parse an explicit argument list; clap errors are returned, not printed.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::apply_debug)
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::try_load_from(["complexity-timeline"]).unwrap();

        assert_eq!(settings.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(settings.metric, DEFAULT_METRIC);
        assert_eq!(settings.view, "chart");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_explicit_values() {
        let settings = Settings::try_load_from([
            "complexity-timeline",
            "--source",
            "posts.csv",
            "--metric",
            "difficult_words",
            "--view",
            "json",
            "--theme",
            "light",
        ])
        .unwrap();
        assert_eq!(settings.source, PathBuf::from("posts.csv"));
        assert_eq!(settings.metric, "difficult_words");
        assert_eq!(settings.view, "json");
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        assert!(Settings::try_load_from(["complexity-timeline", "--view", "pie"]).is_err());
    }

    #[test]
    fn test_settings_clear_flag_no_longer_exists() {
        assert!(Settings::try_load_from(["complexity-timeline", "--clear"]).is_err());
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let settings =
            Settings::try_load_from(["complexity-timeline", "--log-level", "ERROR", "--debug"])
                .unwrap();
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_repeated_runs_start_from_defaults() {
        let first = Settings::try_load_from(["complexity-timeline", "--metric", "n_words"]).unwrap();
        assert_eq!(first.metric, "n_words");

        let second = Settings::try_load_from(["complexity-timeline"]).unwrap();
        assert_eq!(second.metric, DEFAULT_METRIC);
    }
}
