//! CLI tool for exercising consistent hash rings.
//!
//! Provides commands for:
//! - Simulating a workload and inspecting the resulting distribution
//! - Adding/removing nodes after the load and checking keys survive
//! - Resolving keys to their owning node

pub mod commands;
pub mod config;

pub use commands::{execute, CommandResult};
pub use config::{CliConfig, Command, HashKind};
