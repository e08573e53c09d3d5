//! # Tracing Setup
//!
//! Structured logging for every binary built on this framework.

/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **Default level**: `info` when `RUST_LOG` is unset
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - Lifecycle events and one line per driver action
/// - `RUST_LOG=debug` - Every command, reply and tick
/// - `RUST_LOG=pos_automation=debug,tick_actor=info` - Per-crate filtering
///
/// Calling it twice is harmless: the second call leaves the first subscriber in place.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
