// src/utils/common.rs

use indicatif::{ProgressBar, ProgressStyle};
use prometheus::{gather, Encoder, TextEncoder};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{PipelineError, Result};

/// Sets up logging for the binary: `RUST_LOG` filtering (default `info`) on
/// stderr, plus daily-rotated JSON files when `log_dir` is given.
///
/// The returned guard must be kept alive until exit so buffered file logs
/// are flushed.
pub fn init_tracing(log_json: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = if log_json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "sieve.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Creates and configures a new `ProgressBar`, or a spinner when the total is
/// unknown (0).
pub fn create_progress_bar(total_items: u64, message: &str, template: &str) -> ProgressBar {
    let pb = if total_items == 0 {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::new(total_items)
    };
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

/// Renders the default Prometheus registry in text exposition format.
pub fn render_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder
        .encode(&gather(), &mut buffer)
        .map_err(|e| PipelineError::Unexpected(format!("Could not encode prometheus metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| PipelineError::Unexpected(format!("Prometheus metrics UTF-8 error: {}", e)))
}

/// Writes the current metrics to `path` for a textfile collector.
pub fn write_metrics_file(path: &Path) -> Result<()> {
    let rendered = render_metrics()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    info!(path = %path.display(), "Wrote metrics");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::prometheus_metrics::COMMENTS_REMOVED_TOTAL;

    #[test]
    fn test_write_metrics_file_contains_registered_metrics() {
        COMMENTS_REMOVED_TOTAL.with_label_values(&["Too Short"]).inc();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sieve.prom");
        write_metrics_file(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("sieve_comments_removed_total"));
    }

    #[test]
    fn test_progress_bar_spinner_for_zero_total() {
        let pb = create_progress_bar(0, "working", "{spinner} {msg}");
        assert_eq!(pb.length(), None);
        let pb = create_progress_bar(10, "working", "{bar} {pos}/{len}");
        assert_eq!(pb.length(), Some(10));
    }
}
