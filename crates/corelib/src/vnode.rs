//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node having a single token on the ring, each node
//! is hashed into `virtual_nodes` positions. More positions per node smooths
//! the share of the key space each node receives.
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(n * v) positions for n nodes and v vnodes per node
//! - **Lookup**: O(log(n * v)) binary search
//! - **Rebuild**: O(n * v * log(n * v)), only on administrative changes

use crate::partitioner::Partitioner;
use crate::token::Token;

/// A virtual node on the hash ring.
///
/// Represents a single token position owned by a physical node. Ordered by
/// token first, so a sorted slice of vnodes is a sorted ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode<T: Token> {
    /// Token position on the ring: the hash of `"{node}:{vnode_index}"`.
    pub token: T,

    /// Index of the owning physical node in the ring's node list.
    pub node_index: usize,
}

impl<T: Token> VirtualNode<T> {
    #[inline]
    pub fn new(token: T, node_index: usize) -> Self {
        Self { token, node_index }
    }

    /// Create the `vnode_index`-th virtual node of `node`.
    ///
    /// The label hashed is `"{node}:{vnode_index}"`, so two rings built with
    /// the same partitioner place the same node identically.
    pub fn from_index<P>(partitioner: &P, node: &str, vnode_index: usize, node_index: usize) -> Self
    where
        P: Partitioner<TokenType = T>,
    {
        let label = format!("{}:{}", node, vnode_index);
        Self::new(partitioner.partition(label.as_bytes()), node_index)
    }

    #[inline]
    pub fn token(&self) -> T {
        self.token
    }

    #[inline]
    pub fn node_index(&self) -> usize {
        self.node_index
    }

    /// Clockwise distance to another virtual node.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> T {
        self.token.distance_to(&other.token)
    }
}

impl<T: Token + std::fmt::Display> std::fmt::Display for VirtualNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.node_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::Xxh3Partitioner;
    use crate::token::Token128;

    #[test]
    fn test_vnode_creation() {
        let vnode = VirtualNode::new(Token128(100), 1);
        assert_eq!(vnode.token(), Token128(100));
        assert_eq!(vnode.node_index(), 1);
    }

    #[test]
    fn test_vnode_from_index() {
        let p = Xxh3Partitioner;
        let vnode0 = VirtualNode::from_index(&p, "cache-1", 0, 0);
        let vnode1 = VirtualNode::from_index(&p, "cache-1", 1, 0);

        assert_ne!(vnode0.token(), vnode1.token());
        assert_eq!(vnode0.node_index(), vnode1.node_index());
        assert_eq!(vnode0.token(), p.partition(b"cache-1:0"));
    }

    #[test]
    fn test_vnode_distance() {
        let vnode1 = VirtualNode::new(Token128(100), 1);
        let vnode2 = VirtualNode::new(Token128(200), 2);
        assert_eq!(vnode1.distance_to(&vnode2), Token128(100));
    }

    #[test]
    fn test_vnode_ordering() {
        let vnode1 = VirtualNode::new(Token128(100), 9);
        let vnode2 = VirtualNode::new(Token128(200), 0);
        assert!(vnode1 < vnode2);
    }
}
