//! Hash ring with build-then-publish rebuilds.
//!
//! Lookups clone an `Arc` to the current [`RingSnapshot`] under a read lock
//! and search it without holding any lock. Rebuilds construct the next
//! snapshot off to the side and swap it in, so a reader sees either the old
//! ring or the new one, never a ring under construction.

use crate::node::Node;
use crate::partitioner::{Partitioner, Xxh3Partitioner};
use crate::ring::snapshot::RingSnapshot;
use crate::ring::DEFAULT_VIRTUAL_NODES;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Consistent hash ring over string node ids.
///
/// Share it as `Arc<HashRing>` with whatever needs routing decisions; it is
/// `Send + Sync` and every method takes `&self`.
pub struct HashRing<P: Partitioner = Xxh3Partitioner> {
    partitioner: P,
    current: RwLock<Arc<RingSnapshot<P::TokenType>>>,
    /// Serializes rebuilds so one cannot overwrite another built from stale
    /// inputs. Lookups never touch it.
    rebuild: Mutex<()>,
}

impl HashRing<Xxh3Partitioner> {
    /// Ring over `nodes` with `virtual_nodes` positions per node.
    pub fn new<I, S>(nodes: I, virtual_nodes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::with_partitioner(Xxh3Partitioner, nodes, virtual_nodes)
    }

    /// Ring over `nodes` with the default of 100 virtual nodes per node.
    pub fn with_default_vnodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::new(nodes, DEFAULT_VIRTUAL_NODES)
    }
}

impl<P: Partitioner> HashRing<P> {
    pub fn with_partitioner<I, S>(partitioner: P, nodes: I, virtual_nodes: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let nodes: Vec<Arc<str>> = nodes.into_iter().map(Into::into).collect();
        let snapshot = RingSnapshot::build(&partitioner, nodes, virtual_nodes);
        record_positions(&snapshot);
        Self {
            partitioner,
            current: RwLock::new(Arc::new(snapshot)),
            rebuild: Mutex::new(()),
        }
    }

    /// The ring as of now. Holding the returned snapshot pins that version;
    /// later rebuilds do not affect it.
    #[inline]
    pub fn snapshot(&self) -> Arc<RingSnapshot<P::TokenType>> {
        let current = self.current.read();
        Arc::clone(&*current)
    }

    /// Node responsible for `key`, or `None` when the ring has no positions.
    pub fn get_node(&self, key: &str) -> Option<Node> {
        self.lookup_token(self.partitioner.partition(key.as_bytes()))
    }

    /// Like [`get_node`](Self::get_node), treating a missing key as `""`.
    pub fn get_node_or_default(&self, key: Option<&str>) -> Option<Node> {
        self.get_node(key.unwrap_or(""))
    }

    /// Node responsible for an already hashed token.
    pub fn lookup_token(&self, token: P::TokenType) -> Option<Node> {
        self.snapshot().lookup_token(token)
    }

    /// Change the number of virtual nodes per node and rebuild the ring.
    ///
    /// Many keys may move to a different node. Passing the current value
    /// rebuilds an identical ring.
    pub fn set_virtual_nodes(&self, virtual_nodes: usize) {
        let _guard = self.rebuild.lock();
        let nodes = self.snapshot().nodes().to_vec();
        self.publish(nodes, virtual_nodes);
    }

    /// Replace the node list and rebuild the ring.
    pub fn set_nodes<I, S>(&self, nodes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let nodes: Vec<Arc<str>> = nodes.into_iter().map(Into::into).collect();
        let _guard = self.rebuild.lock();
        let virtual_nodes = self.snapshot().virtual_nodes();
        self.publish(nodes, virtual_nodes);
    }

    fn publish(&self, nodes: Vec<Arc<str>>, virtual_nodes: usize) {
        let next = RingSnapshot::build(&self.partitioner, nodes, virtual_nodes);
        let (node_count, positions) = (next.node_count(), next.token_count());
        record_positions(&next);
        *self.current.write() = Arc::new(next);

        metrics::counter!("shard_ring_rebuilds_total").increment(1);
        info!(
            nodes = node_count,
            virtual_nodes,
            positions,
            partitioner = self.partitioner.name(),
            "hash ring rebuilt"
        );
    }

    pub fn nodes(&self) -> Vec<Arc<str>> {
        self.snapshot().nodes().to_vec()
    }

    pub fn node_count(&self) -> usize {
        self.snapshot().node_count()
    }

    pub fn virtual_nodes(&self) -> usize {
        self.snapshot().virtual_nodes()
    }

    pub fn token_count(&self) -> usize {
        self.snapshot().token_count()
    }

    /// `(token, owner)` pairs in ring order (debugging aid).
    pub fn tokens(&self) -> Vec<(P::TokenType, Node)> {
        self.snapshot().tokens()
    }

    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }
}

fn record_positions<T: crate::token::Token>(snapshot: &RingSnapshot<T>) {
    metrics::gauge!("shard_ring_positions").set(snapshot.token_count() as f64);
}

impl<P: Partitioner> fmt::Debug for HashRing<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("HashRing")
            .field("partitioner", &self.partitioner.name())
            .field("nodes", &snapshot.nodes())
            .field("virtual_nodes", &snapshot.virtual_nodes())
            .field("positions", &snapshot.token_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_pinned_across_rebuild() {
        let ring = HashRing::new(["a", "b"], 10);
        let before = ring.snapshot();
        ring.set_virtual_nodes(20);

        assert_eq!(before.token_count(), 20);
        assert_eq!(ring.token_count(), 40);
        assert!(!Arc::ptr_eq(&before, &ring.snapshot()));
    }

    #[test]
    fn test_set_nodes_keeps_vnode_count() {
        let ring = HashRing::new(["a"], 7);
        ring.set_nodes(["x", "y", "z"]);
        assert_eq!(ring.virtual_nodes(), 7);
        assert_eq!(ring.node_count(), 3);
        assert_eq!(ring.token_count(), 21);
    }

    #[test]
    fn test_missing_key_is_empty_string() {
        let ring = HashRing::new(["a", "b", "c"], 50);
        assert_eq!(ring.get_node_or_default(None), ring.get_node(""));
        assert!(ring.get_node_or_default(None).is_some());
    }

    #[test]
    fn test_debug_lists_nodes() {
        let ring = HashRing::new(["cache-1"], 3);
        let rendered = format!("{:?}", ring);
        assert!(rendered.contains("cache-1"));
        assert!(rendered.contains("Xxh3Partitioner"));
    }
}
