//! Consistent-hash shard selection.

use crate::strategy::ShardStrategy;
use corelib::partitioner::{Partitioner, Xxh3Partitioner};
use corelib::ring::HashRing;
use corelib::Node;
use std::sync::Arc;

/// Routes keys through an injected, shared hash ring.
///
/// The ring is not owned: an admin path holding the same `Arc` can resize
/// it and this strategy sees the new placement on the next lookup.
#[derive(Debug)]
pub struct ConsistentStrategy<P: Partitioner = Xxh3Partitioner> {
    ring: Arc<HashRing<P>>,
}

impl<P: Partitioner> ConsistentStrategy<P> {
    pub fn new(ring: Arc<HashRing<P>>) -> Self {
        Self { ring }
    }

    pub fn ring(&self) -> &Arc<HashRing<P>> {
        &self.ring
    }
}

impl<P: Partitioner> Clone for ConsistentStrategy<P> {
    fn clone(&self) -> Self {
        Self {
            ring: Arc::clone(&self.ring),
        }
    }
}

impl<P: Partitioner> ShardStrategy for ConsistentStrategy<P> {
    fn shard_count(&self) -> usize {
        self.ring.node_count()
    }

    fn shard_for(&self, key: &str) -> Option<Node> {
        self.ring.get_node(key)
    }

    fn name(&self) -> &'static str {
        "ConsistentStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_shared_ring() {
        let ring = Arc::new(HashRing::new(["cache-1", "cache-2", "cache-3"], 100));
        let strategy = ConsistentStrategy::new(Arc::clone(&ring));

        assert_eq!(strategy.shard_count(), 3);
        assert_eq!(strategy.shard_for("user:42"), ring.get_node("user:42"));

        ring.set_nodes(["only"]);
        assert_eq!(strategy.shard_for("user:42"), Some(Node::new("only", 0)));
    }

    #[test]
    fn test_empty_ring_has_no_shard() {
        let strategy = ConsistentStrategy::new(Arc::new(HashRing::new(Vec::<String>::new(), 100)));
        assert_eq!(strategy.shard_for("x"), None);
    }
}
