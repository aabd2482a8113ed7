//! Shard selection strategies.
//!
//! A strategy answers "which node serves this key". Two are provided:
//!
//! - **ConsistentStrategy**: delegates to a shared [`HashRing`]; changing the
//!   node list moves only the keys the changed nodes own
//! - **ModuloStrategy**: `key % n` over a fixed shard list; cheap and
//!   predictable, but resizing the list moves almost every key
//!
//! [`HashRing`]: corelib::ring::HashRing

pub mod consistent;
pub mod modulo;

pub use consistent::ConsistentStrategy;
pub use modulo::ModuloStrategy;

use corelib::Node;

/// Trait for shard selection strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they are shared by
/// every request handler.
pub trait ShardStrategy: Send + Sync + 'static {
    /// Number of distinct shards keys can land on.
    fn shard_count(&self) -> usize;

    /// Node that owns `key`, or `None` when there is nothing to route to.
    ///
    /// # Performance
    /// Should be O(log n) or better; this runs on every request.
    fn shard_for(&self, key: &str) -> Option<Node>;

    /// Strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
