//! Shared helpers for the integration tests.

#![allow(dead_code)]

use corelib::partitioner::Partitioner;
use corelib::token::Token32;
use corelib::HashRing;

/// Places `"<letter><n>"` at coordinate `n`, so a test can lay out the ring
/// by hand: node `"n50"` sits at 50 and key `"k45"` hashes to 45.
#[derive(Debug, Clone, Copy, Default)]
pub struct Labelled;

impl Partitioner for Labelled {
    type TokenType = Token32;

    fn partition(&self, key: &[u8]) -> Token32 {
        let digits = std::str::from_utf8(&key[1..]).expect("label is utf-8");
        Token32(digits.parse().expect("label ends in a number"))
    }

    fn name(&self) -> &'static str {
        "Labelled"
    }
}

/// Ring laid out with [`Labelled`] positions.
pub fn labelled_ring(nodes: &[&str]) -> HashRing<Labelled> {
    let ring = HashRing::with_partitioner(Labelled);
    for id in nodes {
        ring.add_node(*id).expect("distinct positions");
    }
    ring
}

/// Ring with `count` default-hashed nodes named `Server1..=Server<count>`.
pub fn server_ring(count: usize) -> HashRing {
    let ring = HashRing::new();
    for i in 1..=count {
        ring.add_node(format!("Server{i}")).expect("no collision among server names");
    }
    ring
}
