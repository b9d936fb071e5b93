//! Logging and tracing setup.
//!
//! The attribute types log through `tracing`: type mismatches at `warn`, plan
//! and validation decisions at `debug`, individual equality checks at
//! `trace`. Providers embedding this crate can install a subscriber with the
//! helpers below. All logs are written to **stderr**, since stdout belongs to
//! the host's plugin handshake.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls log levels (e.g., `info`, `mondoo_provider_types=trace`)
//!
//! # Examples
//!
//! ```bash
//! # Show every semantic equality check
//! RUST_LOG=mondoo_provider_types=trace ./terraform-provider-mondoo
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the default logging subscriber.
///
/// Respects `RUST_LOG` and defaults to `info` when it is not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("info");
}

/// Initialize logging with a custom default level, used when `RUST_LOG` is
/// not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
///
/// # Example
///
/// ```ignore
/// use mondoo_provider_types::init_logging_with_default;
///
/// init_logging_with_default("debug");
/// ```
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Try to initialize logging, returning false if already initialized.
///
/// Unlike [`init_logging`], this does not panic when a subscriber has
/// already been set, which makes it safe to call from tests.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}
