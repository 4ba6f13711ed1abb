//! Consistent hash ring implementation.
//!
//! The ring manages node positions and provides efficient lookup
//! operations for finding the node responsible for a key.

pub mod builder;
pub mod range;
pub mod ring;

pub use builder::RingBuilder;
pub use range::TokenRange;
pub use ring::{HashRing, NodeGuard, Removal};
