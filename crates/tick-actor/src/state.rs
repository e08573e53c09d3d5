//! # ActorState Trait
//!
//! The `ActorState` trait is the contract for anything that wants to live inside a
//! [`StateActor`](crate::StateActor). The actor owns the state exclusively and feeds it
//! commands one at a time, so implementations are plain synchronous `&mut self` code:
//! no locks, no interleaving, and every command runs to completion before the next
//! one (a timer tick included) is even looked at.
//!
//! # Associated Types
//! - `Command` / `Reply`: the request/response vocabulary of the state.
//! - `Snapshot`: a cheap-to-send read model returned by [`ActorState::snapshot`].
//! - `Context`: late-bound dependencies handed to `run()` (e.g. a random source).
//! - `Error`: the domain error. It must absorb [`FrameworkError`] so clients can
//!   return one error type for both transport and domain failures.

use crate::error::FrameworkError;
use std::fmt::Debug;

/// State managed by a [`StateActor`](crate::StateActor).
///
/// # Provided Methods (Hooks)
/// [`ActorState::on_start`] and [`ActorState::on_stop`] default to no-ops.
pub trait ActorState: Send + 'static {
    /// Requests understood by this state.
    type Command: Send + Debug + 'static;

    /// Successful result of a command.
    type Reply: Send + Debug + 'static;

    /// Read model handed out by `snapshot` requests.
    type Snapshot: Send + Debug + 'static;

    /// Runtime dependencies injected into the actor loop.
    /// Use `()` if no dependencies are needed.
    type Context: Send;

    /// The error type for this state.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Apply one command. Called sequentially by the actor loop.
    fn handle(
        &mut self,
        command: Self::Command,
        ctx: &mut Self::Context,
    ) -> Result<Self::Reply, Self::Error>;

    /// Produce the current read model.
    fn snapshot(&self) -> Self::Snapshot;

    /// Called once before the first message is processed.
    fn on_start(&mut self, _ctx: &mut Self::Context) {}

    /// Called once after the mailbox closes.
    fn on_stop(&mut self, _ctx: &mut Self::Context) {}
}
