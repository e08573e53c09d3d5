//! Pure data structures for the point-of-sale floor.
//!
//! These types carry no behaviour beyond local invariants; every cross-entity rule
//! (a table and its order changing together) lives in [`crate::floor::Floor`].

pub mod catalog;
pub mod money;
pub mod order;
pub mod table;

pub use catalog::*;
pub use money::*;
pub use order::*;
pub use table::*;
