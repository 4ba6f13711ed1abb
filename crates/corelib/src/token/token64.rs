//! 64-bit token for wider hash spaces.

use crate::token::traits::Token;
use std::fmt;

/// Coordinate in a 64-bit circular hash space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Token64(pub u64);

impl Token for Token64 {
    fn max() -> Self {
        Token64(u64::MAX)
    }

    fn distance_to(&self, other: &Self) -> Self {
        Token64(other.0.wrapping_sub(self.0))
    }

    fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
