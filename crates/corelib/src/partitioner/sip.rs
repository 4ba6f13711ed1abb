//! SipHash-1-3 partitioner over a 64-bit space.

use crate::partitioner::traits::Partitioner;
use crate::token::token64::Token64;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Partitioner hashing keys into a 64-bit space with keyed SipHash-1-3.
#[derive(Clone, Debug, Default)]
pub struct SipPartitioner {
    k0: u64,
    k1: u64,
}

impl SipPartitioner {
    /// Creates a partitioner with all-zero keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a partitioner with explicit SipHash keys.
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

impl Partitioner for SipPartitioner {
    type TokenType = Token64;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        let mut hasher = SipHasher13::new_with_keys(self.k0, self.k1);
        hasher.write(key);
        Token64(hasher.finish())
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
