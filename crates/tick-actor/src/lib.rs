//! # Tick Actor
//!
//! This crate provides the building blocks for state that is owned by a single Tokio
//! task and mutated both by explicit requests and by a repeating timer.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **State Layer** ([`ActorState`]) - Your domain logic, written as plain `&mut self` code
//! 2. **Runtime Layer** ([`StateActor`]) - Mailbox processing, one message at a time
//! 3. **Interface Layer** ([`StateClient`], [`ActorClient`]) - Type-safe communication
//! 4. **Scheduling Layer** ([`Ticker`]) - Start/stop timers that feed the mailbox
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and owns its state exclusively.
//! - Commands and timer ticks share one mailbox, so they never interleave.
//! - A `Ticker` holds at most one timer task; restarting it replaces the old one.
//!
//! ## Error Model
//!
//! [`FrameworkError`] covers transport failures. Each state brings its own error type,
//! which must implement `From<FrameworkError>`, so `client.request(..).await?` yields a
//! single domain error for both kinds of failure.
//!
//! ## Testing
//!
//! - Call [`ActorState::handle`] directly for pure unit tests of the state.
//! - Use the [`mock`] helpers to test client wrappers without an actor.
//! - Use `#[tokio::test(start_paused = true)]` to drive a [`Ticker`] without real time passing.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod ticker;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StateActor;
pub use client::StateClient;
pub use client_trait::ActorClient;
pub use error::FrameworkError;
pub use message::{Response, StateRequest};
pub use state::ActorState;
pub use ticker::Ticker;
