//! Node abstractions for the consistent hash ring.
//!
//! A node is an opaque string (a cache server address, a shard name). The
//! ring hands out [`Node`] values that also carry the node's position in the
//! list it was built from, so callers can pick a correspondingly indexed
//! connection without a second lookup.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A physical node answering for a key.
///
/// Cheap to clone: the name is shared with the ring snapshot it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Node {
    /// Node identifier as supplied at construction.
    pub name: Arc<str>,
    /// Index of the first occurrence of `name` in the construction list.
    pub index: usize,
}

impl Node {
    pub fn new(name: impl Into<Arc<str>>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// Node name as a string slice.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}
