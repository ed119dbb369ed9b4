//! Structured logging for the cubit crates.
//!
//! Installs a `tracing` subscriber with console output and, in debug builds, a
//! JSON log file for post-mortem analysis. The filter comes from `RUST_LOG`
//! when set, otherwise from the configured log level.

use std::fs::File;
use std::path::Path;

use cubit_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the JSON log written inside the log directory.
pub const LOG_FILE_NAME: &str = "cubit.log";

const DEFAULT_FILTER: &str = "info";

/// Filter string taken from `config`, falling back to [`DEFAULT_FILTER`].
fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Opens the JSON log file, creating the directory if needed.
fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_dir` - Optional directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `config` - Optional configuration supplying the log level and file toggle
///
/// # Examples
///
/// ```no_run
/// use cubit_config::Config;
/// use cubit_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    // Console layer: human-readable format with time since start.
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let file_enabled = config.is_none_or(|c| c.debug.log_to_file);
    if debug_build
        && file_enabled
        && let Some(log_file) = log_dir.and_then(open_log_file)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter used when neither `RUST_LOG` nor the config sets one.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
