//! Error types for the POS store actor.

use crate::floor::FloorError;
use thiserror::Error;
use tick_actor::FrameworkError;

/// Everything a caller of the store can see go wrong.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PosError {
    /// The floor rejected the operation.
    #[error(transparent)]
    Floor(#[from] FloorError),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    Framework(#[from] FrameworkError),

    /// The store answered with a reply of the wrong shape.
    #[error("Unexpected reply to {command}: {reply}")]
    UnexpectedReply {
        command: &'static str,
        reply: String,
    },
}
