//! # POS Automation
//!
//! > **A simulated restaurant floor, driven by a timer and owned by an actor.**
//!
//! This crate models a small point-of-sale system (catalog, tables, orders) and an
//! automation agent that keeps the dining room busy for demos: on every tick it may
//! open an order on a free table, push orders through the kitchen, and take payment
//! for served orders, writing one line per action to a bounded activity log.
//!
//! ## 🏗️ Design
//!
//! All state for one instance lives in a single [`PosStore`](store::PosStore) owned
//! by a [`tick_actor::StateActor`]. Timer ticks and cashier actions are both just
//! messages in its mailbox, so they run one at a time and never observe each other
//! half-done. Nothing is global: every [`PosSystem`](lifecycle::PosSystem) owns its
//! own store, agent and random source.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`], [`floor`])
//! - [`model`]: plain entities and ids ([`Order`](model::Order), [`Table`](model::Table),
//!   [`CatalogItem`](model::CatalogItem), exact [`Money`](model::Money)).
//! - [`floor`]: the entity store and every rule tying a table to its order.
//!
//! ### 2. The Simulation ([`automation`], [`activity_log`])
//! - [`Automation::tick`](automation::Automation::tick) performs one probabilistic
//!   spawn/advance/settle pass against a floor with an injected `rand::Rng`.
//! - [`ActivityLog`](activity_log::ActivityLog) keeps the newest lines, oldest evicted.
//!
//! ### 3. The Runtime ([`store`], [`clients`], [`agent`], [`lifecycle`])
//! - [`store`]: the actor state and its command vocabulary.
//! - [`clients`]: [`PosClient`](clients::PosClient), the typed front door.
//! - [`agent`]: start/stop/interval control over a [`tick_actor::Ticker`].
//! - [`lifecycle`]: spins everything up from a [`config::SystemConfig`] and shuts it down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo for ten seconds with a fixed seed
//! POS_SEED=7 POS_RUN_SECS=10 POS_TICK_INTERVAL_MS=2000 RUST_LOG=info cargo run
//! ```

pub mod activity_log;
pub mod agent;
pub mod automation;
pub mod clients;
pub mod config;
pub mod floor;
pub mod lifecycle;
pub mod model;
pub mod store;
