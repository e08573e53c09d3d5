//! # Generic Actor Server
//!
//! This module defines the `StateActor`, the task that owns a piece of state and
//! processes every request against it sequentially.

use crate::client::StateClient;
use crate::message::StateRequest;
use crate::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns one [`ActorState`].
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state and the
/// receiver end of the channel. Timer ticks, user commands and snapshot reads all
/// arrive through the same mailbox, so a tick can never observe a half-applied
/// command and vice versa. No `Mutex` is needed around the state.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StateActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use tick_actor::{ActorState, FrameworkError, StateActor};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error")]
/// struct CounterError;
/// impl From<FrameworkError> for CounterError {
///     fn from(_: FrameworkError) -> Self { CounterError }
/// }
///
/// struct Counter(u32);
///
/// impl ActorState for Counter {
///     type Command = u32;
///     type Reply = u32;
///     type Snapshot = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn handle(&mut self, add: u32, _: &mut ()) -> Result<u32, CounterError> {
///         self.0 += add;
///         Ok(self.0)
///     }
///     fn snapshot(&self) -> u32 { self.0 }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StateActor::new(Counter(0), 10);
///     tokio::spawn(actor.run(()));
///     assert_eq!(client.request(2).await.unwrap(), 2);
///     assert_eq!(client.snapshot().await.unwrap(), 2);
/// }
/// ```
pub struct StateActor<S: ActorState> {
    receiver: mpsc::Receiver<StateRequest<S>>,
    state: S,
}

impl<S: ActorState> StateActor<S> {
    /// Creates a new `StateActor` around `state` and its associated `StateClient`.
    ///
    /// # Arguments
    ///
    /// * `state` - The initial state, moved into the actor.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(state: S, buffer_size: usize) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        let client = StateClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// The `context` argument is handed to every command. This allows the state to
    /// use dependencies (a random source, a clock) chosen by whoever spawns the actor.
    pub async fn run(mut self, mut context: S::Context) {
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");
        self.state.on_start(&mut context);

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Command {
                    command,
                    respond_to,
                } => {
                    debug!(state_type, ?command, "Command");
                    let result = self.state.handle(command, &mut context);
                    match &result {
                        Ok(reply) => debug!(state_type, ?reply, "Command ok"),
                        Err(e) => warn!(state_type, error = %e, "Command failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StateRequest::Snapshot { respond_to } => {
                    debug!(state_type, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.snapshot()));
                }
            }
        }

        self.state.on_stop(&mut context);
        info!(state_type, "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameworkError;

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum LedgerError {
        #[error("overdrawn by {0}")]
        Overdrawn(u32),
        #[error(transparent)]
        Framework(#[from] FrameworkError),
    }

    #[derive(Debug)]
    enum LedgerCommand {
        Deposit(u32),
        Withdraw(u32),
    }

    struct Ledger {
        balance: u32,
        stopped: std::sync::Arc<std::sync::atomic::AtomicBool>,
    }

    impl ActorState for Ledger {
        type Command = LedgerCommand;
        type Reply = u32;
        type Snapshot = u32;
        type Context = u32;
        type Error = LedgerError;

        fn handle(&mut self, command: LedgerCommand, fee: &mut u32) -> Result<u32, LedgerError> {
            match command {
                LedgerCommand::Deposit(amount) => self.balance += amount,
                LedgerCommand::Withdraw(amount) => {
                    let needed = amount + *fee;
                    if needed > self.balance {
                        return Err(LedgerError::Overdrawn(needed - self.balance));
                    }
                    self.balance -= needed;
                }
            }
            Ok(self.balance)
        }

        fn snapshot(&self) -> u32 {
            self.balance
        }

        fn on_stop(&mut self, _ctx: &mut u32) {
            self.stopped
                .store(true, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_commands_are_applied_in_order_with_context() {
        let stopped = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let ledger = Ledger {
            balance: 0,
            stopped: stopped.clone(),
        };
        let (actor, client) = StateActor::new(ledger, 4);
        let handle = tokio::spawn(actor.run(1));

        assert_eq!(client.request(LedgerCommand::Deposit(10)).await.unwrap(), 10);
        assert_eq!(client.request(LedgerCommand::Withdraw(4)).await.unwrap(), 5);
        assert_eq!(
            client.request(LedgerCommand::Withdraw(9)).await,
            Err(LedgerError::Overdrawn(5))
        );
        assert_eq!(client.snapshot().await.unwrap(), 5);

        drop(client);
        handle.await.unwrap();
        assert!(stopped.load(std::sync::atomic::Ordering::SeqCst));
    }
}
