//! 32-bit token, the default hash-space width.

use crate::token::traits::Token;
use std::fmt;

/// Coordinate in a 32-bit circular hash space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Token32(pub u32);

impl Token for Token32 {
    fn max() -> Self {
        Token32(u32::MAX)
    }

    fn distance_to(&self, other: &Self) -> Self {
        Token32(other.0.wrapping_sub(self.0))
    }

    fn as_u64(&self) -> u64 {
        u64::from(self.0)
    }
}

impl fmt::Display for Token32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
