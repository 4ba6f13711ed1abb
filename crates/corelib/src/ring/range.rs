//! Arcs of the hash space.

use std::fmt;

use crate::token::Token;

/// The arc of hash space owned by one node: `(start, end]`, read clockwise.
///
/// `start` is the predecessor's position and `end` the owner's. When a node
/// is alone on the ring `start == end` and the arc covers every coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TokenRange<T: Token> {
    start: T,
    end: T,
}

impl<T: Token> TokenRange<T> {
    /// Arc from `start` (exclusive) clockwise to `end` (inclusive).
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// True when the arc is the whole ring.
    pub fn is_full(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, token: T) -> bool {
        if self.is_full() {
            return true;
        }
        if self.start < self.end {
            self.start < token && token <= self.end
        } else {
            // Wraps past the maximum coordinate.
            token > self.start || token <= self.end
        }
    }

    /// Fraction of the hash space covered, in `(0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.is_full() {
            return 1.0;
        }
        let span = self.start.distance_to(&self.end).as_u64() as f64;
        span / (<T as Token>::max().as_u64() as f64 + 1.0)
    }
}

impl<T: Token> fmt::Display for TokenRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.start, self.end)
    }
}
