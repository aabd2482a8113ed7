//! Immutable ring state.
//!
//! A [`RingSnapshot`] is a pure function of (partitioner, nodes,
//! virtual_nodes). It is never mutated after construction: the ring swaps in
//! a whole new snapshot on every rebuild.

use crate::node::Node;
use crate::partitioner::Partitioner;
use crate::token::Token;
use crate::vnode::VirtualNode;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Sorted virtual nodes plus the node list they were derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingSnapshot<T: Token> {
    nodes: Vec<Arc<str>>,
    virtual_nodes: usize,
    /// Sorted by token, one entry per distinct token.
    vnodes: Vec<VirtualNode<T>>,
}

impl<T: Token> RingSnapshot<T> {
    /// Place every node's virtual nodes on a fresh ring.
    ///
    /// Nodes are inserted in list order, each node's vnodes in index order.
    /// When two labels hash to the same token the later insert owns it.
    pub fn build<P>(partitioner: &P, nodes: Vec<Arc<str>>, virtual_nodes: usize) -> Self
    where
        P: Partitioner<TokenType = T>,
    {
        let vnodes = {
            let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
            let mut placements: BTreeMap<T, usize> = BTreeMap::new();

            for (index, node) in nodes.iter().enumerate() {
                let owner = *first_seen.entry(node.as_ref()).or_insert(index);
                for vnode_index in 0..virtual_nodes {
                    let vnode = VirtualNode::from_index(partitioner, node, vnode_index, owner);
                    placements.insert(vnode.token, vnode.node_index);
                }
            }

            placements
                .into_iter()
                .map(|(token, node_index)| VirtualNode::new(token, node_index))
                .collect()
        };

        Self {
            nodes,
            virtual_nodes,
            vnodes,
        }
    }

    /// A ring with no nodes; every lookup answers `None`.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            virtual_nodes: 0,
            vnodes: Vec::new(),
        }
    }

    /// Node owning `token`: the first vnode at or after it, wrapping to the
    /// smallest vnode past the end of the ring.
    pub fn lookup_token(&self, token: T) -> Option<Node> {
        let idx = self.vnodes.partition_point(|v| v.token < token);
        let vnode = self.vnodes.get(idx).or_else(|| self.vnodes.first())?;
        Some(self.node_at(vnode.node_index))
    }

    /// Position in `vnodes()` of the owner of `token`, with the same
    /// wrap-around rule as [`lookup_token`](Self::lookup_token).
    pub fn owner_position(&self, token: T) -> Option<usize> {
        if self.vnodes.is_empty() {
            return None;
        }
        let idx = self.vnodes.partition_point(|v| v.token < token);
        Some(if idx == self.vnodes.len() { 0 } else { idx })
    }

    fn node_at(&self, index: usize) -> Node {
        Node::new(Arc::clone(&self.nodes[index]), index)
    }

    /// Node list exactly as supplied at construction.
    pub fn nodes(&self) -> &[Arc<str>] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn virtual_nodes(&self) -> usize {
        self.virtual_nodes
    }

    /// Sorted ring positions.
    pub fn vnodes(&self) -> &[VirtualNode<T>] {
        &self.vnodes
    }

    pub fn token_count(&self) -> usize {
        self.vnodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }

    /// `(token, owner)` pairs in ring order.
    pub fn tokens(&self) -> Vec<(T, Node)> {
        self.vnodes
            .iter()
            .map(|v| (v.token, self.node_at(v.node_index)))
            .collect()
    }
}
