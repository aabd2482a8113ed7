//! Token abstraction module for consistent hashing.
//!
//! Tokens represent positions on the hash ring and must be comparable,
//! hashable, and thread-safe.

pub mod hash128;
pub mod traits;

pub use hash128::Token128;
pub use traits::Token;
