//! # Mock Framework & Testing Guide
//!
//! Helpers for testing domain clients without spawning a real actor.
//!
//! | Feature | Mock helpers | Real Actor |
//! |---------|--------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (you answer by hand) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the state itself or full system |
//!
//! ## Pattern: Client Logic Test
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its mailbox.
//! Drive the client from a spawned task, then use [`expect_command`] or
//! [`expect_snapshot`] to assert what was sent and answer it.
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<PosStore>(10);
//! let pos = PosClient::new(client);
//! let task = tokio::spawn(async move { pos.advance_order(order_id).await });
//!
//! let (command, responder) = expect_command(&mut receiver).await.unwrap();
//! assert!(matches!(command, PosCommand::AdvanceOrder(_)));
//! responder.send(Ok(PosReply::Status(OrderStatus::Preparing))).unwrap();
//!
//! assert_eq!(task.await.unwrap().unwrap(), OrderStatus::Preparing);
//! ```

use crate::client::StateClient;
use crate::message::{Response, StateRequest};
use crate::state::ActorState;
use tokio::sync::mpsc;

/// Creates a client whose requests land in the returned receiver.
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (StateClient<S>, mpsc::Receiver<StateRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Command request
pub async fn expect_command<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(S::Command, Response<S::Reply, S::Error>)> {
    match receiver.recv().await {
        Some(StateRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<Response<S::Snapshot>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
