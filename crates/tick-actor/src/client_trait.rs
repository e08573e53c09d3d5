//! # ActorClient Trait
//!
//! Provides a common interface for domain-specific clients, adding a default
//! `snapshot` method built on top of a generic `StateClient`.
use crate::{ActorState, StateClient};
use async_trait::async_trait;

/// Trait for domain clients that wrap a [`StateClient`].
///
/// Implementors only expose their inner client; `snapshot` comes for free and
/// reports transport failures in the domain's error type.
#[async_trait]
pub trait ActorClient<S: ActorState>: Send + Sync {
    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<S>;

    /// Fetch the current read model.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S::Snapshot, S::Error> {
        tracing::debug!("Sending request");
        Ok(self.inner().snapshot().await?)
    }
}
