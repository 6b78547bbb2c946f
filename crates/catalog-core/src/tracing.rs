//! Tracing setup for the catalog services.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset. sqlx logs every statement
/// at debug, which drowns out application events.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

/// Install the JSON stdout subscriber. Call once at startup; repeated
/// calls are no-ops so tests can initialize freely.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
