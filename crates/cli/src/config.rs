//! Command-line configuration for `ringctl`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{self, CommandResult};

/// Inspect and exercise a consistent hash ring.
#[derive(Parser, Debug)]
#[command(name = "ringctl", version, about = "Consistent hash ring driver")]
pub struct CliConfig {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, env = "RINGCTL_LOG", default_value = "info")]
    pub log_level: String,

    /// Hash function placing nodes and keys.
    #[arg(long, global = true, value_enum, default_value_t = HashKind::Xxh32)]
    pub hash: HashKind,

    /// Print results as JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum HashKind {
    /// 32-bit xxHash.
    Xxh32,
    /// 64-bit SipHash-1-3.
    Sip,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill a ring with random entries, optionally change membership, and
    /// report the distribution.
    Simulate(SimulateArgs),

    /// Show which node owns each key.
    Lookup {
        /// Node to place on the ring (repeatable).
        #[arg(short, long = "node", required = true)]
        nodes: Vec<String>,

        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of nodes to start with.
    #[arg(short, long, default_value_t = 50)]
    pub nodes: usize,

    /// Node names are `<prefix><n>`, counting from 1.
    #[arg(long, default_value = "Server")]
    pub prefix: String,

    /// Number of random entries to store.
    #[arg(short, long, default_value_t = 100_000)]
    pub keys: usize,

    /// Shortest generated key or value.
    #[arg(long, default_value_t = 5)]
    pub min_len: usize,

    /// Longest generated key or value.
    #[arg(long, default_value_t = 10)]
    pub max_len: usize,

    /// Seed for reproducible workloads.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Nodes to add after the entries are stored (repeatable).
    #[arg(long = "add")]
    pub add: Vec<String>,

    /// Nodes to remove after the entries are stored (repeatable).
    #[arg(long = "remove")]
    pub remove: Vec<String>,

    /// Move entries to nodes added after the initial load.
    #[arg(long)]
    pub migrate_on_add: bool,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        setup_tracing(&self.log_level);
        let result: CommandResult = commands::execute(&self.command, self.hash)?;
        println!("{}", result.render(self.json)?);
        Ok(())
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses `level`.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
