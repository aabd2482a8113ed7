//! Routing errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    /// The strategy has no node for this key (empty ring or pool).
    #[error("no backend available for key {key:?}")]
    NoBackend { key: String },

    /// The connector failed to open a connection to the chosen node.
    #[error("failed to connect to {node}: {source}")]
    Connect {
        node: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("virtual node count must be non-negative, got {0}")]
    InvalidVirtualNodes(i64),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
