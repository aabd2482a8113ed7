//! 128-bit hash token.

use crate::token::traits::Token;
use std::fmt;

/// Ring position in the full 128-bit token space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Token128(pub u128);

/// Size of the token space as a float (2^128).
const RING_SIZE: f64 = u128::MAX as f64 + 1.0;

impl Token for Token128 {
    fn zero() -> Self {
        Token128(0)
    }

    fn max() -> Self {
        Token128(u128::MAX)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_max(&self) -> bool {
        self.0 == u128::MAX
    }

    fn distance_to(&self, other: &Self) -> Self {
        if other.0 >= self.0 {
            Token128(other.0 - self.0)
        } else {
            Token128((u128::MAX - self.0) + other.0 + 1)
        }
    }

    fn fraction_of_ring(&self) -> f64 {
        self.0 as f64 / RING_SIZE
    }
}

impl fmt::Display for Token128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}
