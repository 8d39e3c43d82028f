//! Structured JSONL debug logging.
//!
//! Rofi owns stdout (and reads our stdin in blocks mode), so diagnostics can
//! never go to the terminal. When verbosity is above zero every `tracing`
//! event is appended as JSON to the configured debug log file; at verbosity
//! zero no subscriber is installed and events are discarded.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rofi_kit::{config, logging};
//!
//! let config = config::load_config();
//! // MUST keep guard alive for the duration of the program
//! let _guard = logging::init(&config);
//!
//! tracing::info!(event_type = "startup", "Script started");
//! ```

use std::fs::OpenOptions;
use std::io::Write;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

const SESSION_SEPARATOR: &str = "---------------------------------------------------";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Map a 1-5 verbosity onto a tracing level. 0 means off.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        4 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Initialize file logging according to `config.verbosity`.
///
/// Returns None (and installs nothing) when verbosity is 0 or the log file
/// cannot be opened. `RUST_LOG` overrides the verbosity-derived level.
pub fn init(config: &Config) -> Option<LoggingGuard> {
    if !config.is_debug() {
        return None;
    }

    let mut file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "[ROFI-KIT] Failed to open debug log {}: {}",
                config.log_file.display(),
                e
            );
            return None;
        }
    };

    // Mark the start of a new invocation; rofi re-runs script mode per action
    if let Err(e) = writeln!(file, "\n{}\n", SESSION_SEPARATOR) {
        eprintln!(
            "[ROFI-KIT] Failed to write to debug log {}: {}",
            config.log_file.display(),
            e
        );
        return None;
    }

    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(level_for_verbosity(config.verbosity).into())
    });

    let json_layer = fmt::layer()
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

    // A host may already have installed a subscriber; keep theirs
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        verbosity = config.verbosity,
        log_path = %config.log_file.display(),
        "Debug logging initialized"
    );

    Some(LoggingGuard {
        _file_guard: file_guard,
    })
}
