//! Key → node → connection.

use crate::error::{Result, RoutingError};
use crate::pool::{Connector, NodePool};
use crate::strategy::ShardStrategy;
use corelib::Node;
use std::sync::Arc;
use tracing::warn;

/// Picks a node with `S` and hands back its pooled connection.
///
/// Requests without a natural partitioning key pass `None`; they are routed
/// as the empty string, so they always land on the same node.
pub struct Router<S: ShardStrategy, C: Connector> {
    strategy: S,
    pool: NodePool<C>,
}

impl<S: ShardStrategy, C: Connector> Router<S, C> {
    pub fn new(strategy: S, connector: C) -> Self {
        Self {
            strategy,
            pool: NodePool::new(connector),
        }
    }

    /// Node that serves `key`.
    pub fn route(&self, key: Option<&str>) -> Result<Node> {
        let key = key.unwrap_or("");
        self.strategy.shard_for(key).ok_or_else(|| {
            warn!(key, strategy = self.strategy.name(), "no backend for key");
            RoutingError::NoBackend {
                key: key.to_string(),
            }
        })
    }

    /// Connection to the node that serves `key`.
    pub async fn connection(&self, key: Option<&str>) -> Result<Arc<C::Conn>> {
        let node = self.route(key)?;
        self.pool.get(&node).await
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn pool(&self) -> &NodePool<C> {
        &self.pool
    }
}
