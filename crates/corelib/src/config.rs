//! Static ring configuration.
//!
//! The ring is built once at startup from a fixed node list. A restart
//! rebuilds it from this configuration; nothing is persisted.

use crate::error::{Error, Result};
use crate::ring::{HashRing, DEFAULT_VIRTUAL_NODES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Node list and replication factor for a ring.
///
/// ```json
/// { "nodes": ["localhost:6379", "localhost:6380"], "virtual_nodes": 100 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingConfig {
    #[serde(default = "default_nodes")]
    pub nodes: Vec<String>,
    #[serde(default = "default_virtual_nodes")]
    pub virtual_nodes: usize,
}

fn default_nodes() -> Vec<String> {
    ["localhost:6379", "localhost:6380", "localhost:6381"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_virtual_nodes() -> usize {
    DEFAULT_VIRTUAL_NODES
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            virtual_nodes: default_virtual_nodes(),
        }
    }
}

impl RingConfig {
    pub fn new(nodes: Vec<String>, virtual_nodes: usize) -> Self {
        Self {
            nodes,
            virtual_nodes,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject node names that are empty or only whitespace.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.nodes.iter().position(|n| n.trim().is_empty()) {
            return Err(Error::Config(format!("node #{} has a blank name", pos)));
        }
        Ok(())
    }

    pub fn build_ring(&self) -> HashRing {
        HashRing::new(self.nodes.iter().map(String::as_str), self.virtual_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = RingConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RingConfig::default());
        assert_eq!(config.virtual_nodes, 100);
        assert_eq!(config.nodes.len(), 3);
    }

    #[test]
    fn test_explicit_fields() {
        let config =
            RingConfig::from_json_str(r#"{"nodes": ["shard_1", "shard_2"], "virtual_nodes": 8}"#)
                .unwrap();
        let ring = config.build_ring();
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.token_count(), 16);
    }

    #[test]
    fn test_blank_node_rejected() {
        let err = RingConfig::from_json_str(r#"{"nodes": ["a", "  "]}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn test_negative_vnodes_rejected_by_parser() {
        let err = RingConfig::from_json_str(r#"{"virtual_nodes": -1}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RingConfig::from_path("/nonexistent/ring.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
