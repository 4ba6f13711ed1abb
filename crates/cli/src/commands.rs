//! Subcommand implementations.

use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use corelib::partitioner::{Partitioner, SipPartitioner, Xxh32Partitioner};
use corelib::{NodeId, RingBuilder, Token, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Command, HashKind, SimulateArgs};

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Output of a subcommand, printable as a table or as JSON.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandResult {
    Simulation(SimulationReport),
    Lookup {
        partitioner: &'static str,
        owners: Vec<Ownership>,
    },
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub topology: Topology,
    /// Distinct keys written during the run.
    pub written: usize,
    /// Keys still readable with their written value after membership changes.
    pub reachable: usize,
}

#[derive(Debug, Serialize)]
pub struct Ownership {
    pub key: String,
    pub hash: u64,
    pub node: NodeId,
}

impl CommandResult {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return serde_json::to_string_pretty(self).context("encoding result as JSON");
        }

        let mut out = String::new();
        match self {
            CommandResult::Simulation(report) => {
                write_topology(&mut out, &report.topology)?;
                writeln!(
                    out,
                    "{} of {} keys reachable",
                    report.reachable, report.written
                )?;
            }
            CommandResult::Lookup { owners, .. } => {
                for o in owners {
                    writeln!(out, "{:<24} {:>20}  -> {}", o.key, o.hash, o.node)?;
                }
            }
        }
        Ok(out.trim_end().to_string())
    }
}

fn write_topology(out: &mut String, topology: &Topology) -> std::fmt::Result {
    writeln!(out, "partitioner: {}", topology.partitioner)?;
    writeln!(
        out,
        "{:<16} {:>20} {:>10} {:>9}",
        "NODE", "HASH", "KEYS", "SHARE"
    )?;
    for node in topology.iter() {
        writeln!(
            out,
            "{:<16} {:>20} {:>10} {:>8.3}%",
            node.id,
            node.position,
            node.key_count,
            node.ownership * 100.0
        )?;
    }
    writeln!(
        out,
        "{} nodes, {} keys",
        topology.len(),
        topology.total_keys()
    )
}

/// Runs `command` on a ring hashed with `hash`.
pub fn execute(command: &Command, hash: HashKind) -> Result<CommandResult> {
    match hash {
        HashKind::Xxh32 => run_with(command, Xxh32Partitioner::new()),
        HashKind::Sip => run_with(command, SipPartitioner::new()),
    }
}

fn run_with<P: Partitioner>(command: &Command, partitioner: P) -> Result<CommandResult> {
    match command {
        Command::Simulate(args) => simulate(args, partitioner),
        Command::Lookup { nodes, keys } => lookup(nodes, keys, partitioner),
    }
}

fn simulate<P: Partitioner>(args: &SimulateArgs, partitioner: P) -> Result<CommandResult> {
    if args.min_len > args.max_len {
        bail!(
            "--min-len ({}) must not exceed --max-len ({})",
            args.min_len,
            args.max_len
        );
    }

    let ring = RingBuilder::new()
        .with_partitioner(partitioner)
        .migrate_on_add(args.migrate_on_add)
        .add_nodes((1..=args.nodes).map(|i| format!("{}{}", args.prefix, i)))
        .build()
        .context("building initial ring")?;
    info!(
        nodes = ring.node_count(),
        partitioner = ring.partitioner_name(),
        "ring ready"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut written = HashMap::with_capacity(args.keys);
    if args.keys > 0 && ring.is_empty() {
        bail!("cannot store {} keys on a ring with no nodes", args.keys);
    }
    for _ in 0..args.keys {
        let key = random_string(&mut rng, args.min_len, args.max_len);
        let value = random_string(&mut rng, args.min_len, args.max_len);
        ring.store_key(&key, value.as_str())?;
        written.insert(key, value);
    }
    info!(entries = written.len(), "workload stored");

    for id in &args.add {
        let position = ring
            .add_node(id.as_str())
            .with_context(|| format!("adding node {id}"))?;
        info!(node = %id, %position, "node added");
    }
    for id in &args.remove {
        let removal = ring
            .remove_node(id)
            .with_context(|| format!("removing node {id}"))?;
        info!(
            node = %id,
            successor = ?removal.successor,
            migrated = removal.migrated,
            dropped = removal.dropped,
            "node removed"
        );
    }

    let reachable = written
        .iter()
        .filter(|&(k, v)| ring.retrieve_key(k).is_ok_and(|got| got == *v))
        .count();
    debug!(reachable, written = written.len(), "verified entries");

    Ok(CommandResult::Simulation(SimulationReport {
        topology: ring.list_nodes(),
        written: written.len(),
        reachable,
    }))
}

fn lookup<P: Partitioner>(
    nodes: &[String],
    keys: &[String],
    partitioner: P,
) -> Result<CommandResult> {
    let ring = RingBuilder::new()
        .with_partitioner(partitioner)
        .add_nodes(nodes.iter().cloned())
        .build()
        .context("building ring")?;

    let owners = keys
        .iter()
        .map(|key| -> Result<Ownership> {
            let node = ring.get_node(key)?.id().clone();
            Ok(Ownership {
                key: key.clone(),
                hash: ring.token_for(key).as_u64(),
                node,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CommandResult::Lookup {
        partitioner: ring.partitioner_name(),
        owners,
    })
}

fn random_string<R: Rng>(rng: &mut R, min_len: usize, max_len: usize) -> String {
    let len = rng.random_range(min_len..=max_len);
    (0..len)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}
