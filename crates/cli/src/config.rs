//! Command line options and ring configuration resolution.
//!
//! Precedence, lowest to highest: built-in defaults, `--config` JSON file,
//! `RING_NODES` / `RING_VIRTUAL_NODES`, explicit flags.

use crate::commands::Command;
use anyhow::Context;
use clap::Parser;
use corelib::RingConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "ringctl", version, about = "Inspect consistent hash ring placement")]
pub struct CliConfig {
    /// JSON file with `nodes` and `virtual_nodes`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Comma separated node ids; replaces the configured list.
    #[arg(long, env = "RING_NODES", value_delimiter = ',', global = true)]
    pub nodes: Vec<String>,

    /// Virtual nodes per node.
    #[arg(long, env = "RING_VIRTUAL_NODES", global = true)]
    pub vnodes: Option<usize>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn ring_config(&self) -> corelib::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => RingConfig::from_path(path)?,
            None => RingConfig::default(),
        };
        if !self.nodes.is_empty() {
            config.nodes = self.nodes.clone();
        }
        if let Some(virtual_nodes) = self.vnodes {
            config.virtual_nodes = virtual_nodes;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let ring_config = self.ring_config().context("loading ring configuration")?;
        let ring = ring_config.build_ring();
        debug!(
            nodes = ring.node_count(),
            virtual_nodes = ring.virtual_nodes(),
            "ring built"
        );

        let result = self.command.execute(&ring)?;
        let rendered = if self.json {
            serde_json::to_string_pretty(&result)?
        } else {
            result.to_string()
        };
        println!("{}", rendered);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::try_parse_from([
            "ringctl", "--nodes", "a,b", "--vnodes", "5", "ownership",
        ])
        .unwrap();
        let config = cli.ring_config().unwrap();
        assert_eq!(config.nodes, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.virtual_nodes, 5);
    }

    #[test]
    fn test_blank_node_flag_rejected() {
        let cli = CliConfig::try_parse_from(["ringctl", "--nodes", "a,,b", "ownership"]).unwrap();
        assert!(cli.ring_config().is_err());
    }

    #[test]
    fn test_resize_accepts_negative_for_validation() {
        let cli = CliConfig::try_parse_from(["ringctl", "resize", "--to", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Resize { to: -3, .. }));
    }
}
