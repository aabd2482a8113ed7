//! Property tests: placement is a pure function of (nodes, virtual_nodes).

use corelib::ring::HashRing;
use proptest::prelude::*;

fn node_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}(:[0-9]{2,4})?", 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn same_inputs_same_owner(nodes in node_list(), vnodes in 1usize..64, key in ".*") {
        let a = HashRing::new(nodes.iter().map(String::as_str), vnodes);
        let b = HashRing::new(nodes.iter().map(String::as_str), vnodes);
        prop_assert_eq!(a.get_node(&key), b.get_node(&key));
        prop_assert_eq!(a.get_node(&key), a.get_node(&key));
    }

    #[test]
    fn index_is_first_occurrence(nodes in node_list(), vnodes in 1usize..64, key in ".*") {
        let ring = HashRing::new(nodes.iter().map(String::as_str), vnodes);
        let node = ring.get_node(&key).unwrap();
        let expected = nodes.iter().position(|n| n.as_str() == node.name()).unwrap();
        prop_assert_eq!(node.index, expected);
    }

    #[test]
    fn resize_round_trip_restores_mapping(nodes in node_list(), vnodes in 1usize..64, other in 0usize..64) {
        let ring = HashRing::new(nodes.iter().map(String::as_str), vnodes);
        let original = ring.snapshot();
        ring.set_virtual_nodes(other);
        ring.set_virtual_nodes(vnodes);
        let rebuilt = ring.snapshot();
        prop_assert_eq!(&*original, &*rebuilt);
    }
}
