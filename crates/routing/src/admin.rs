//! Administrative ring operations.
//!
//! These are what an admin endpoint calls after decoding its request: they
//! validate the raw parameter and delegate to the ring.

use crate::error::{Result, RoutingError};
use corelib::partitioner::Partitioner;
use corelib::ring::HashRing;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminResponse {
    pub message: String,
}

/// Resize the ring to `requested` virtual nodes per node.
///
/// Negative counts are rejected before the ring is touched.
pub fn set_virtual_nodes<P: Partitioner>(ring: &HashRing<P>, requested: i64) -> Result<AdminResponse> {
    let virtual_nodes =
        usize::try_from(requested).map_err(|_| RoutingError::InvalidVirtualNodes(requested))?;
    ring.set_virtual_nodes(virtual_nodes);
    Ok(AdminResponse {
        message: format!("Virtual nodes set to {}", virtual_nodes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applies_count() {
        let ring = HashRing::new(["a", "b"], 100);
        let response = set_virtual_nodes(&ring, 10).unwrap();
        assert_eq!(response.message, "Virtual nodes set to 10");
        assert_eq!(ring.token_count(), 20);
    }

    #[test]
    fn test_zero_empties_ring() {
        let ring = HashRing::new(["a", "b"], 100);
        set_virtual_nodes(&ring, 0).unwrap();
        assert_eq!(ring.get_node("k"), None);
    }

    #[test]
    fn test_negative_rejected_without_rebuild() {
        let ring = HashRing::new(["a", "b"], 100);
        let before = ring.snapshot();

        let err = set_virtual_nodes(&ring, -5).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidVirtualNodes(-5)));
        assert!(std::sync::Arc::ptr_eq(&before, &ring.snapshot()));
    }
}
