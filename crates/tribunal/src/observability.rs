//! Logging initialisation.

use crate::LogFormat;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tribunal_error::{ConfigError, TribunalResult};

const VERBOSE_FILTER: &str = "info,tribunal=debug,tribunal_core=debug,tribunal_discord=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering (default `info`); `verbose` replaces it with
/// debug output for the workspace crates.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_logging(verbose: bool, format: LogFormat) -> TribunalResult<()> {
    let env_filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    installed.map_err(|e| ConfigError::new(format!("Failed to initialise logging: {e}")).into())
}
