//! Ring topology analysis.
//!
//! Read-only views over a ring snapshot: how much of the token space each
//! node owns, how a sample of keys spreads across nodes, and how many keys
//! a rebuild moves.

use crate::partitioner::Partitioner;
use crate::ring::{HashRing, RingSnapshot};
use crate::token::Token;
use serde::Serialize;
use std::collections::HashSet;

/// Share of the ring owned by one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeShare {
    pub node: String,
    pub index: usize,
    /// Virtual nodes that survived collision resolution.
    pub positions: usize,
    /// Fraction of the token space in `[0, 1]`.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnershipReport {
    pub nodes: Vec<NodeShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLoad {
    pub node: String,
    pub index: usize,
    pub keys: usize,
}

/// Key counts per node for a sample of keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub total_keys: usize,
    /// Keys with no owner (empty ring).
    pub unrouted: usize,
    pub loads: Vec<NodeLoad>,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    /// `max / mean`; 1.0 is a perfectly even spread.
    pub skew: f64,
}

impl LoadReport {
    pub fn keys_for(&self, node: &str) -> Option<usize> {
        self.loads.iter().find(|l| l.node == node).map(|l| l.keys)
    }
}

/// Keys whose owner differs between two ring versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemapReport {
    pub total_keys: usize,
    pub moved: usize,
    pub fraction: f64,
}

/// Namespace for topology calculations.
#[derive(Debug, Clone)]
pub struct Topology;

impl Topology {
    /// Fraction of the token space owned by each distinct node.
    ///
    /// A position owns the arc from its predecessor (exclusive) to itself
    /// (inclusive); the first position's predecessor is the last one.
    pub fn ownership<T: Token>(snapshot: &RingSnapshot<T>) -> OwnershipReport {
        let vnodes = snapshot.vnodes();
        let mut positions = vec![0usize; snapshot.node_count()];
        let mut fractions = vec![0f64; snapshot.node_count()];

        match vnodes {
            [] => {}
            [only] => {
                positions[only.node_index] = 1;
                fractions[only.node_index] = 1.0;
            }
            [.., last] => {
                let mut prev = last;
                for vnode in vnodes {
                    positions[vnode.node_index] += 1;
                    fractions[vnode.node_index] += prev.distance_to(vnode).fraction_of_ring();
                    prev = vnode;
                }
            }
        }

        let nodes = distinct_nodes(snapshot)
            .map(|(index, name)| NodeShare {
                node: name.to_string(),
                index,
                positions: positions[index],
                fraction: fractions[index],
            })
            .collect();

        OwnershipReport { nodes }
    }

    /// Route every key against one snapshot of `ring` and count per node.
    pub fn distribution<P, I, K>(ring: &HashRing<P>, keys: I) -> LoadReport
    where
        P: Partitioner,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let snapshot = ring.snapshot();
        let partitioner = ring.partitioner();
        let mut counts = vec![0usize; snapshot.node_count()];
        let mut total_keys = 0;
        let mut unrouted = 0;

        for key in keys {
            total_keys += 1;
            let token = partitioner.partition(key.as_ref().as_bytes());
            match snapshot.lookup_token(token) {
                Some(node) => counts[node.index] += 1,
                None => unrouted += 1,
            }
        }

        let loads: Vec<NodeLoad> = distinct_nodes(&snapshot)
            .map(|(index, name)| NodeLoad {
                node: name.to_string(),
                index,
                keys: counts[index],
            })
            .collect();

        let min = loads.iter().map(|l| l.keys).min().unwrap_or(0);
        let max = loads.iter().map(|l| l.keys).max().unwrap_or(0);
        let mean = if loads.is_empty() {
            0.0
        } else {
            (total_keys - unrouted) as f64 / loads.len() as f64
        };
        let skew = if mean > 0.0 { max as f64 / mean } else { 0.0 };

        LoadReport {
            total_keys,
            unrouted,
            loads,
            min,
            max,
            mean,
            skew,
        }
    }

    /// Count keys whose owning node name changes from `before` to `after`.
    pub fn remapped<P, I, K>(
        partitioner: &P,
        before: &RingSnapshot<P::TokenType>,
        after: &RingSnapshot<P::TokenType>,
        keys: I,
    ) -> RemapReport
    where
        P: Partitioner,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut total_keys = 0;
        let mut moved = 0;

        for key in keys {
            total_keys += 1;
            let token = partitioner.partition(key.as_ref().as_bytes());
            let old = before.lookup_token(token).map(|n| n.name);
            let new = after.lookup_token(token).map(|n| n.name);
            if old != new {
                moved += 1;
            }
        }

        let fraction = if total_keys == 0 {
            0.0
        } else {
            moved as f64 / total_keys as f64
        };

        RemapReport {
            total_keys,
            moved,
            fraction,
        }
    }
}

/// `(index, name)` for the first occurrence of each node name.
fn distinct_nodes<T: Token>(snapshot: &RingSnapshot<T>) -> impl Iterator<Item = (usize, &str)> {
    let mut seen: HashSet<&str> = HashSet::new();
    snapshot
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, name)| (index, &**name))
        .filter(move |(_, name)| seen.insert(*name))
}
