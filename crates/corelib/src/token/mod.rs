//! Token abstraction module for consistent hashing.
//!
//! Tokens represent positions on the hash ring and must be comparable,
//! hashable, and thread-safe.

pub mod token32;
pub mod token64;
pub mod traits;

pub use token32::Token32;
pub use token64::Token64;
pub use traits::Token;
