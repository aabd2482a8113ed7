//! XXH3-128 partitioner, the ring's default.

use crate::partitioner::traits::Partitioner;
use crate::token::Token128;
use xxhash_rust::xxh3::xxh3_128;

/// Partitioner using the 128-bit XXH3 hash.
///
/// Picked for distribution and speed only; placements are not meant to be
/// unpredictable to an adversary.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    type TokenType = Token128;

    #[inline]
    fn partition(&self, key: &[u8]) -> Self::TokenType {
        Token128(xxh3_128(key))
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_partition_is_deterministic() {
        let p = Xxh3Partitioner;
        assert_eq!(p.partition(b"user:42"), p.partition(b"user:42"));
        assert_ne!(p.partition(b"user:42"), p.partition(b"user:43"));
    }

    #[test]
    fn test_token_bounds() {
        let p = Xxh3Partitioner;
        assert!(p.min_token().is_zero());
        assert!(p.max_token().is_max());
    }
}
