mod bootstrap;

use std::fmt::Write as _;

use anyhow::Result;
use timeline_core::error::TimelineError;
use timeline_core::formatting::format_number;
use timeline_core::settings::Settings;
use timeline_data::aggregator::MonthlyAggregator;
use timeline_data::analysis::AnalysisResult;
use timeline_runtime::orchestrator::{self, PipelineOrchestrator};
use timeline_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;

    // The chart view owns the terminal, so its logs go to a file.
    let log_file = match (&settings.log_file, settings.view.as_str()) {
        (Some(path), _) => Some(path.clone()),
        (None, "chart") => Some(bootstrap::default_log_path()),
        (None, _) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Complexity Timeline v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Source: {}, Metric: {}, View: {}, Theme: {}",
        settings.source.display(),
        settings.metric,
        settings.view,
        settings.theme
    );

    match settings.view.as_str() {
        "chart" => {
            let orchestrator =
                PipelineOrchestrator::new(settings.source.clone(), settings.metric.clone());
            let (rx, handle) = orchestrator.start();

            let app = App::new(
                &settings.theme,
                bootstrap::dataset_name(&settings.source),
                settings.metric.clone(),
            );

            // The loop exits on 'q' / Ctrl+C inside the TUI. The OS-level
            // signal covers Ctrl+C delivered outside raw mode.
            tokio::select! {
                result = app.run(rx) => {
                    handle.cancel();
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; stopping pipeline");
                    handle.abort();
                }
            }
        }

        "summary" | "json" => {
            let outcome = tokio::select! {
                outcome = orchestrator::run_once(settings.source.clone(), settings.metric.clone()) => outcome,
                _ = tokio::signal::ctrl_c() => Err(TimelineError::Cancelled),
            };
            let result = report_failure(outcome)?;

            if settings.view == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", summary_text(&result));
            }
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}

/// Log a pipeline failure and turn it into the user-facing message.
fn report_failure(outcome: Result<AnalysisResult, TimelineError>) -> Result<AnalysisResult> {
    outcome.map_err(|err| {
        tracing::error!("Timeline pipeline failed: {}", err);
        let message = err.category().message();
        anyhow::Error::new(err).context(message)
    })
}

/// Plain-text rendering of the timeline for the `summary` view.
fn summary_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Text complexity timeline ({})", result.metric);
    let _ = writeln!(out, "{}", "=".repeat(60));

    if result.is_empty() {
        let _ = writeln!(out, "No dated records found.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<6} {:>10} {:>10} {:>10} {:>8}",
        "Month", "Average", "Min", "Max", "Texts"
    );
    for stat in &result.timeline {
        let _ = writeln!(
            out,
            "{:<6} {:>10} {:>10} {:>10} {:>8}",
            stat.month.label(),
            format_number(stat.avg, 1),
            format_number(stat.min, 1),
            format_number(stat.max, 1),
            stat.count
        );
    }

    let totals = MonthlyAggregator::calculate_totals(&result.timeline);
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format_number(v, 1));
    let _ = writeln!(
        out,
        "{:<6} {:>10} {:>10} {:>10} {:>8}",
        "TOTAL",
        fmt_opt(totals.average),
        fmt_opt(totals.min),
        fmt_opt(totals.max),
        totals.count
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Global average: {}", fmt_opt(result.global_average));
    let _ = writeln!(out);

    for month in result.months() {
        let _ = writeln!(out, "{}", result.narrative(Some(month)));
        let _ = writeln!(out);
    }

    out
}
