//! Tracing setup.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither the caller nor `RUST_LOG` provides one.
pub const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Installs a formatted `tracing` subscriber for the process.
///
/// `filter` uses [`EnvFilter`] syntax, e.g. `"flowkit_layout=debug"`. An
/// invalid or missing filter falls back to `RUST_LOG`, then to
/// [`DEFAULT_FILTER`]. Only the first call has any effect.
pub fn install(filter: Option<&str>) {
    TRACING_INSTALLED.call_once(|| {
        let filter = filter
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

        let console = fmt::layer().with_target(true).with_filter(filter);
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("flowkit tracing subscriber failed to initialize");
        }
    });
}

/// Whether [`install`] has run.
#[must_use]
pub fn is_installed() -> bool {
    TRACING_INSTALLED.is_completed()
}
