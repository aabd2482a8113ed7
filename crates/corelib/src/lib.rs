//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Token types and implementations
//! - Partitioner algorithms
//! - Node and virtual node abstractions
//! - The hash ring and its immutable snapshots
//! - Topology analysis (ownership, load, remapping cost)
//! - Static ring configuration

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use node::Node;
pub use partitioner::Partitioner;
pub use ring::{HashRing, Ring, RingBuilder, RingSnapshot, DEFAULT_VIRTUAL_NODES};
pub use token::Token;
pub use topology::Topology;
pub use vnode::VirtualNode;
