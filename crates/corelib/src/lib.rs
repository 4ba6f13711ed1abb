//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Token types (hash-space coordinates)
//! - Partitioner algorithms (key to token)
//! - Nodes and their local key/value stores
//! - The ring: placement, resolution, membership changes and key migration
//! - Topology snapshots for reporting
//!
//! ```rust
//! use corelib::{Error, HashRing};
//!
//! let ring = HashRing::new();
//! assert_eq!(ring.retrieve_key("x"), Err(Error::EmptyRing));
//!
//! ring.add_node("cache-1").unwrap();
//! ring.add_node("cache-2").unwrap();
//! ring.store_key("user:1", "alice").unwrap();
//! assert_eq!(ring.retrieve_key("user:1").unwrap(), "alice");
//! ```

pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;

pub use error::{Error, Result};
pub use node::{Node, NodeId};
pub use partitioner::Partitioner;
pub use ring::{HashRing, NodeGuard, Removal, RingBuilder, TokenRange};
pub use token::Token;
pub use topology::{NodeSummary, Topology};
