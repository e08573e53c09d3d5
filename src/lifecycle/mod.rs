//! Startup and shutdown of a POS instance.

pub mod pos_system;

pub use pos_system::*;
