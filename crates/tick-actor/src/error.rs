//! # Framework Errors
//!
//! Errors raised by the plumbing itself (mailboxes, response channels, timers).
//! Domain failures travel in the state's own error type, which must be
//! constructible from a [`FrameworkError`] so a single `?` covers both.

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Invalid tick period: {0:?}")]
    InvalidPeriod(Duration),
}
