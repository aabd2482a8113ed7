//! Fixed-pool modulo shard selection.
//!
//! Numeric keys (entity primary keys) go to shard `pk % n`. Any other key is
//! first reduced to a number with XXH3-64.
//!
//! # Limitations
//!
//! - Growing or shrinking the pool remaps nearly every key
//! - Only suitable when the shard count is fixed for the data's lifetime

use crate::strategy::ShardStrategy;
use corelib::Node;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Debug, Clone)]
pub struct ModuloStrategy {
    shards: Vec<Arc<str>>,
}

impl ModuloStrategy {
    pub fn new<I, S>(shards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            shards: shards.into_iter().map(Into::into).collect(),
        }
    }

    /// `count` shards named `shard_1` through `shard_{count}`.
    pub fn with_count(count: usize) -> Self {
        Self::new((1..=count).map(|n| format!("shard_{}", n)))
    }

    /// Shard for a numeric primary key.
    pub fn shard_for_id(&self, pk: u64) -> Option<Node> {
        if self.shards.is_empty() {
            return None;
        }
        let index = (pk % self.shards.len() as u64) as usize;
        Some(Node::new(Arc::clone(&self.shards[index]), index))
    }
}

impl ShardStrategy for ModuloStrategy {
    fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_for(&self, key: &str) -> Option<Node> {
        let pk = key.parse::<u64>().unwrap_or_else(|_| xxh3_64(key.as_bytes()));
        self.shard_for_id(pk)
    }

    fn name(&self) -> &'static str {
        "ModuloStrategy"
    }
}
