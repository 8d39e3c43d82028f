use thiserror::Error;
use tracing::{error, warn};

/// How a failure affects the conversation with rofi
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Logged and skipped; the caller falls back to a safe default
    Degraded,
    /// The protocol is desynchronized and the process must terminate
    Fatal,
}

/// Domain-specific errors for the rofi protocol layer
#[derive(Error, Debug)]
pub enum RofiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not resolve the user cache directory")]
    CacheDirUnavailable,

    #[error("Could not decode event: {0}")]
    StreamDecode(#[source] serde_json::Error),

    #[error("Invalid event value. Needs to have a value and at least one command: {0}")]
    InvalidEventPayload(String),

    #[error("Could not marshal block model: {0}")]
    Render(#[source] serde_json::Error),
}

impl RofiError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) | Self::CacheDirUnavailable => ErrorSeverity::Degraded,
            Self::StreamDecode(_) | Self::InvalidEventPayload(_) | Self::Render(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }
}

pub type Result<T> = std::result::Result<T, RofiError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller's primary action
/// must not be blocked.
///
/// # Examples
///
/// ```ignore
/// use rofi_kit::error::ResultExt;
///
/// // History is best-effort
/// let history = store.load("apps").warn_on_err().unwrap_or_default();
/// ```
pub trait ResultExt<T> {
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Log a fatal protocol error and terminate the process.
///
/// Continuing after a desynchronized stream or a corrupt render would feed
/// rofi data it cannot parse.
pub fn exit_fatal(context: &str, err: &RofiError) -> ! {
    error!(error = %err, context = context, "Fatal protocol error, exiting");
    eprintln!("{}: {}", context, err);
    std::process::exit(1)
}
