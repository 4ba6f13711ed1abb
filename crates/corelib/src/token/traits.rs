//! Core token trait definitions.
//!
//! A token is a coordinate in the circular hash space. The trait is kept
//! minimal: ring logic only needs ordering, clockwise distance and a way to
//! report the value.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Minimal token trait for the hash ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to copy/compare.
pub trait Token: Copy + Ord + Hash + Send + Sync + Debug + Display + 'static {
    /// Maximum token value (end of ring). The value after it wraps to zero.
    fn max() -> Self;

    /// Clockwise distance from `self` to `other` on the ring.
    fn distance_to(&self, other: &Self) -> Self;

    /// Widened numeric value, used for reporting and error payloads.
    fn as_u64(&self) -> u64;
}
