//! Lazily connected per-node backend pool.
//!
//! The ring only names a node; something still has to hold the connection
//! (Redis client, database session factory) for it. [`NodePool`] opens one
//! per node on first use and hands out shared references afterwards.

use crate::error::{Result, RoutingError};
use async_trait::async_trait;
use corelib::Node;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Opens a backend connection for a node id.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Conn: Send + Sync + 'static;

    async fn connect(&self, node: &str) -> anyhow::Result<Self::Conn>;
}

type Slot<T> = Arc<OnceCell<Arc<T>>>;

pub struct NodePool<C: Connector> {
    connector: C,
    slots: DashMap<Arc<str>, Slot<C::Conn>>,
}

impl<C: Connector> NodePool<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            slots: DashMap::new(),
        }
    }

    /// Connection for `node`, opening it if this is the first request.
    ///
    /// Concurrent first requests for the same node share a single connect
    /// attempt. A failed attempt leaves the slot empty so the next call
    /// retries.
    pub async fn get(&self, node: &Node) -> Result<Arc<C::Conn>> {
        let slot: Slot<C::Conn> = Arc::clone(&*self.slots.entry(Arc::clone(&node.name)).or_default());

        let conn = slot
            .get_or_try_init(|| async {
                debug!(node = %node.name, "opening backend connection");
                self.connector
                    .connect(&node.name)
                    .await
                    .map(Arc::new)
                    .map_err(|source| RoutingError::Connect {
                        node: node.name.to_string(),
                        source,
                    })
            })
            .await?;

        Ok(Arc::clone(conn))
    }

    /// Open connections to every node up front.
    pub async fn connect_all(&self, nodes: &[Arc<str>]) -> Result<()> {
        for (index, name) in nodes.iter().enumerate() {
            self.get(&Node::new(Arc::clone(name), index)).await?;
        }
        Ok(())
    }

    /// Number of nodes with an open connection.
    pub fn connected(&self) -> usize {
        self.slots.iter().filter(|slot| slot.value().initialized()).count()
    }

    /// Drop the cached connection for `node`; the next `get` reconnects.
    pub fn evict(&self, node: &str) -> bool {
        self.slots.remove(node).is_some()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        opened: AtomicUsize,
    }

    #[async_trait]
    impl Connector for Counting {
        type Conn = String;

        async fn connect(&self, node: &str) -> anyhow::Result<String> {
            if node == "down" {
                anyhow::bail!("connection refused");
            }
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(format!("conn-to-{}", node))
        }
    }

    #[tokio::test]
    async fn test_connects_once_per_node() {
        let pool = NodePool::new(Counting::default());
        let node = Node::new("localhost:6379", 0);

        let a = pool.get(&node).await.unwrap();
        let b = pool.get(&node).await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, "conn-to-localhost:6379");
        assert_eq!(pool.connector().opened.load(Ordering::SeqCst), 1);
        assert_eq!(pool.connected(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_use_shares_connect() {
        let pool = Arc::new(NodePool::new(Counting::default()));
        let node = Node::new("cache-1", 0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let node = node.clone();
                tokio::spawn(async move { pool.get(&node).await.map(|c| c.len()) })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(pool.connector().opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported_and_retried() {
        let pool = NodePool::new(Counting::default());
        let node = Node::new("down", 3);

        let err = pool.get(&node).await.unwrap_err();
        assert!(matches!(err, RoutingError::Connect { ref node, .. } if node == "down"));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(pool.connected(), 0);
    }

    #[tokio::test]
    async fn test_connect_all_and_evict() {
        let pool = NodePool::new(Counting::default());
        let nodes: Vec<Arc<str>> = vec![Arc::from("a"), Arc::from("b")];

        pool.connect_all(&nodes).await.unwrap();
        assert_eq!(pool.connected(), 2);

        assert!(pool.evict("a"));
        assert!(!pool.evict("a"));
        assert_eq!(pool.connected(), 1);

        pool.get(&Node::new("a", 0)).await.unwrap();
        assert_eq!(pool.connector().opened.load(Ordering::SeqCst), 3);
    }
}
