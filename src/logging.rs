//! Diagnostic logging setup.
//!
//! Everything logs through `tracing`; the subscriber prints to stderr and
//! honours `RUST_LOG`, defaulting to info for this crate.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "channel_chat=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
