//! Backend selection on top of the consistent hash ring.
//!
//! This crate turns a routing key into a live backend connection:
//! - Shard strategies pick the node (consistent hashing or fixed modulo)
//! - A lazy pool opens at most one connection per node
//! - The router glues both and maps "no node" to an error the caller handles
//! - An admin entry point validates and applies virtual node changes

pub mod admin;
pub mod error;
pub mod pool;
pub mod router;
pub mod strategy;

pub use admin::AdminResponse;
pub use error::RoutingError;
pub use pool::{Connector, NodePool};
pub use router::Router;
pub use strategy::{ConsistentStrategy, ModuloStrategy, ShardStrategy};
