//! SipHash-1-3 (128-bit output) partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::Token128;
use siphasher::sip128::{Hasher128, SipHasher13};
use std::hash::Hasher;

/// Partitioner backed by 128-bit SipHash-1-3.
///
/// Keys default to zero so placements are reproducible across processes.
/// Two rings only agree on placements when their keys match.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner {
    k0: u64,
    k1: u64,
}

impl SipPartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitioner with explicit SipHash keys.
    pub fn with_keys(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

impl Partitioner for SipPartitioner {
    type TokenType = Token128;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        let mut hasher = SipHasher13::new_with_keys(self.k0, self.k1);
        hasher.write(key);
        Token128(hasher.finish128().as_u128())
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
