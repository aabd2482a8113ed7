//! Subcommands and their results.

use clap::Subcommand;
use corelib::ring::HashRing;
use corelib::topology::{LoadReport, OwnershipReport, RemapReport};
use corelib::Topology;
use routing::{admin, RoutingError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show which node owns each key.
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Route synthetic keys and count them per node.
    Distribution {
        #[arg(long, default_value_t = 10_000)]
        keys: usize,
    },
    /// Share of the token space owned by each node.
    Ownership,
    /// Change the virtual node count and report how many keys move.
    Resize {
        #[arg(long, allow_negative_numbers = true)]
        to: i64,
        #[arg(long, default_value_t = 10_000)]
        keys: usize,
    },
}

/// Owner of one looked-up key. `node` is `None` on an empty ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub key: String,
    pub node: Option<String>,
    pub index: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Lookup {
        assignments: Vec<Assignment>,
    },
    Distribution(LoadReport),
    Ownership(OwnershipReport),
    Resize {
        from: usize,
        to: usize,
        remap: RemapReport,
        distribution: LoadReport,
    },
}

fn synthetic_keys(count: usize) -> impl Iterator<Item = String> + Clone {
    (0..count).map(|i| format!("key:{}", i))
}

impl Command {
    pub fn execute(&self, ring: &HashRing) -> Result<CommandResult, RoutingError> {
        let result = match self {
            Command::Lookup { keys } => CommandResult::Lookup {
                assignments: keys
                    .iter()
                    .map(|key| {
                        let node = ring.get_node(key);
                        Assignment {
                            key: key.clone(),
                            index: node.as_ref().map(|n| n.index),
                            node: node.map(|n| n.name.to_string()),
                        }
                    })
                    .collect(),
            },
            Command::Distribution { keys } => {
                CommandResult::Distribution(Topology::distribution(ring, synthetic_keys(*keys)))
            }
            Command::Ownership => CommandResult::Ownership(Topology::ownership(&ring.snapshot())),
            Command::Resize { to, keys } => {
                let before = ring.snapshot();
                admin::set_virtual_nodes(ring, *to)?;
                let after = ring.snapshot();
                let sample = synthetic_keys(*keys);

                CommandResult::Resize {
                    from: before.virtual_nodes(),
                    to: after.virtual_nodes(),
                    remap: Topology::remapped(ring.partitioner(), &before, &after, sample.clone()),
                    distribution: Topology::distribution(ring, sample),
                }
            }
        };
        Ok(result)
    }
}

fn write_loads(f: &mut fmt::Formatter<'_>, report: &LoadReport) -> fmt::Result {
    for load in &report.loads {
        writeln!(f, "  {:<24} #{:<3} {:>8}", load.node, load.index, load.keys)?;
    }
    write!(
        f,
        "  keys={} unrouted={} min={} max={} skew={:.3}",
        report.total_keys, report.unrouted, report.min, report.max, report.skew
    )
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Lookup { assignments } => {
                for (i, a) in assignments.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    match (&a.node, a.index) {
                        (Some(node), Some(index)) => write!(f, "{} -> {} (#{})", a.key, node, index)?,
                        _ => write!(f, "{} -> - (no node)", a.key)?,
                    }
                }
                Ok(())
            }
            CommandResult::Distribution(report) => {
                writeln!(f, "distribution:")?;
                write_loads(f, report)
            }
            CommandResult::Ownership(report) => {
                writeln!(f, "ownership:")?;
                for (i, share) in report.nodes.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "  {:<24} #{:<3} positions={:<6} {:>7.3}%",
                        share.node,
                        share.index,
                        share.positions,
                        share.fraction * 100.0
                    )?;
                }
                Ok(())
            }
            CommandResult::Resize {
                from,
                to,
                remap,
                distribution,
            } => {
                writeln!(
                    f,
                    "virtual nodes {} -> {}: {} of {} keys moved ({:.1}%)",
                    from,
                    to,
                    remap.moved,
                    remap.total_keys,
                    remap.fraction * 100.0
                )?;
                write_loads(f, distribution)
            }
        }
    }
}
