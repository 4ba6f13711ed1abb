//! xxHash32 partitioner, the ring's default.

use crate::partitioner::traits::Partitioner;
use crate::token::token32::Token32;
use xxhash_rust::xxh32::xxh32;

/// Partitioner hashing keys into a 32-bit space with xxHash32.
#[derive(Clone, Debug, Default)]
pub struct Xxh32Partitioner {
    seed: u32,
}

impl Xxh32Partitioner {
    /// Creates a partitioner with the default seed of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a partitioner with an explicit seed. Rings that must agree on
    /// placement have to use the same seed.
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }
}

impl Partitioner for Xxh32Partitioner {
    type TokenType = Token32;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        Token32(xxh32(key, self.seed))
    }

    fn name(&self) -> &'static str {
        "Xxh32Partitioner"
    }
}
