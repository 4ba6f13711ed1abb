//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring.

pub mod sip;
pub mod traits;
pub mod xxh32;

pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxh32::Xxh32Partitioner;
