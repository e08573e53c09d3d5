//! Type-safe wrappers around [`StateClient`](tick_actor::StateClient).

pub mod pos_client;

pub use pos_client::*;
