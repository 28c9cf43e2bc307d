use thiserror::Error;
use tracing::{error, warn};

/// Error severity, used to pick the log level when a failure is absorbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning, // recoverable, a default is substituted
    Error,   // the run cannot produce its output
}

/// Domain-specific errors for storyboard sync
#[derive(Error, Debug)]
pub enum StoryboardError {
    #[error("Failed to read source file '{path}': {source}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read layout file '{path}': {source}")]
    LayoutRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed layout file '{path}': {reason}")]
    MalformedLayout { path: String, reason: String },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write layout file '{path}': {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoryboardError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SourceRead { .. } => ErrorSeverity::Warning,
            Self::LayoutRead { .. } => ErrorSeverity::Warning,
            Self::MalformedLayout { .. } => ErrorSeverity::Warning,
            Self::ConfigRead { .. } => ErrorSeverity::Warning,
            Self::ConfigParse { .. } => ErrorSeverity::Warning,
            Self::OutputWrite { .. } => ErrorSeverity::Error,
        }
    }

    /// Log an absorbed failure at the level its severity calls for
    pub fn log(&self, message: &str) {
        match self.severity() {
            ErrorSeverity::Warning => warn!(error = %self, "{}", message),
            ErrorSeverity::Error => error!(error = %self, "{}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoryboardError>;

/// Extension trait for soft-failure logging with caller location tracking.
/// Use when the run can continue with a default.
///
/// # Examples
///
/// ```ignore
/// use storyboard_sync::error::ResultExt;
///
/// // Fall back to a fresh layout if the old one cannot be read
/// let existing = read_layout(path).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log as warning with caller location and return None.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = %error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
