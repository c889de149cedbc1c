//! Tracing setup.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives (default: `info,position_sizer=info`)
//! - `observability.log_format`: `pretty` or `json`
//! - `observability.ansi`: colorize pretty output

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ObservabilityConfig};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,position_sizer=info";

/// Error returned when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber has already been set.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_current_span(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_ansi(config.ansi)
            .try_init(),
    }
}
