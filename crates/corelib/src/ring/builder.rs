//! Builder for [`HashRing`].

use crate::partitioner::{Partitioner, Xxh3Partitioner};
use crate::ring::{HashRing, DEFAULT_VIRTUAL_NODES};
use std::sync::Arc;

/// Collects nodes and settings, then builds the ring in one pass.
///
/// ```rust
/// use corelib::ring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_vnodes(50)
///     .add_node("localhost:6379")
///     .add_node("localhost:6380")
///     .build();
/// assert_eq!(ring.token_count(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<P: Partitioner = Xxh3Partitioner> {
    nodes: Vec<Arc<str>>,
    virtual_nodes: usize,
    partitioner: P,
}

impl RingBuilder<Xxh3Partitioner> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            virtual_nodes: DEFAULT_VIRTUAL_NODES,
            partitioner: Xxh3Partitioner,
        }
    }
}

impl Default for RingBuilder<Xxh3Partitioner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    /// Virtual nodes per physical node (default 100).
    pub fn with_vnodes(mut self, virtual_nodes: usize) -> Self {
        self.virtual_nodes = virtual_nodes;
        self
    }

    pub fn add_node(mut self, node: impl Into<Arc<str>>) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn add_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Swap the hash used for both node placement and key lookup.
    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            nodes: self.nodes,
            virtual_nodes: self.virtual_nodes,
            partitioner,
        }
    }

    pub fn build(self) -> HashRing<P> {
        HashRing::with_partitioner(self.partitioner, self.nodes, self.virtual_nodes)
    }
}
