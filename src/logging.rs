//! Structured logging: human-readable stderr plus optional JSONL file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use storyboard_sync::logging;
//!
//! // Keep the guard alive for the duration of the run
//! let _guard = logging::init(&logging::LogSettings::default());
//!
//! tracing::info!(scenes = 4, "Storyboard written");
//! ```
//!
//! # JSONL Output Format
//!
//! With a log file configured, each line is a JSON object:
//! ```json
//! {"timestamp":"2026-10-19T10:30:45.123Z","level":"INFO","target":"storyboard_sync::sync","fields":{"message":"Storyboard written","scenes":4}}
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard flushes and closes the JSONL file, if any.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// What the CLI asks of the logging setup
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    /// Debug-level output instead of info
    pub verbose: bool,
    /// Also write JSONL records to this file
    pub json_path: Option<PathBuf>,
}

/// Filter directive used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initialize logging.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Returns a guard that
/// MUST be kept alive until the run ends.
pub fn init(settings: &LogSettings) -> LoggingGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings.verbose)));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(settings.verbose)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let (json_layer, file_guard) = match settings.json_path.as_ref().and_then(open_log_file) {
        Some(file) => {
            // Non-blocking so a slow disk never stalls the scan
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: tests and repeated calls in one process must not panic
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init();

    tracing::debug!(
        event_type = "app_lifecycle",
        action = "started",
        json_log = ?settings.json_path,
        "Logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Open the JSONL file in append mode, creating parent directories.
fn open_log_file(path: &PathBuf) -> Option<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("[LOGGING] Failed to create log directory: {}", e);
            return None;
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("sync.jsonl");
        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let settings = LogSettings::default();
        let _first = init(&settings);
        let _second = init(&settings);
    }
}
