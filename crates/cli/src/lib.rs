//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Looking up the owner of keys
//! - Checking key distribution and token ownership
//! - Measuring how many keys a virtual node resize moves

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
