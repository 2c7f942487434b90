//! CLI argument parsing for lobbylock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lobbylock: fail-fast resource lock registry for game-lobby servers.
///
/// The registry lives inside a single process. This binary drives it for
/// load testing and configuration checks.
#[derive(Parser, Debug)]
#[command(name = "lobbylock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lobbylock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate workers contending for game locks.
    ///
    /// Spawns worker threads that repeatedly try to lock `game-<n>`
    /// resources through one registry, optionally abandoning some holds so
    /// that timeouts have to reclaim them.
    Simulate(SimulateArgs),

    /// Show the effective configuration.
    ///
    /// Loads and validates the config file (or the defaults) and prints it
    /// as YAML.
    Config(ConfigArgs),
}

/// Arguments for the `simulate` command.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Path to a lobbylock.yaml config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of worker threads.
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Number of distinct `game-<n>` resources.
    #[arg(long, default_value_t = 2)]
    pub resources: usize,

    /// Acquisition attempts per worker.
    #[arg(long, default_value_t = 50)]
    pub iterations: usize,

    /// How long a successful worker holds its lock, in milliseconds.
    #[arg(long, default_value_t = 2)]
    pub hold_ms: u64,

    /// Lock timeout in milliseconds (overrides the config default).
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Abandon every Nth successful hold instead of releasing it (0 disables).
    #[arg(long, default_value_t = 0)]
    pub abandon_every: usize,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Path to a lobbylock.yaml config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
