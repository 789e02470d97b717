//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "lftp_client=info";

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering. If not set,
/// defaults to `lftp_client=info`.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
}

/// Try to initialize logging with an explicit level or filter directive.
///
/// A bare level such as `debug` applies to this crate only; anything else is
/// used as an `EnvFilter` directive string. Invalid directives fall back to
/// the default filter.
pub fn init_with_filter(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let directive = filter_directive(level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
}

fn filter_directive(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => DEFAULT_FILTER.to_string(),
        lvl @ ("error" | "warn" | "info" | "debug" | "trace" | "off") => {
            format!("lftp_client={}", lvl)
        }
        _ => level.to_string(),
    }
}
