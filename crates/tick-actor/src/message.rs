//! # Generic Messages
//!
//! Message types exchanged between a [`StateClient`](crate::StateClient) and its
//! [`StateActor`](crate::StateActor).

use crate::error::FrameworkError;
use crate::state::ActorState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E = FrameworkError> = oneshot::Sender<Result<T, E>>;

/// Internal message type sent to the actor.
///
/// - **Command**: a state-specific mutation or query, answered with the state's
///   own `Reply`/`Error` pair.
/// - **Snapshot**: a read of the whole state, which cannot fail at the domain level.
#[derive(Debug)]
pub enum StateRequest<S: ActorState> {
    Command {
        command: S::Command,
        respond_to: Response<S::Reply, S::Error>,
    },
    Snapshot {
        respond_to: Response<S::Snapshot>,
    },
}
