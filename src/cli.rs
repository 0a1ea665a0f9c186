// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `nodehook`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nodehook",
    version,
    about = "Run start/stop hooks around on-demand node connect/disconnect.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Nodehook.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Nodehook.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NODEHOOK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the node inventory, but don't execute
    /// anything.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Lifecycle operation to run.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run the node's start hook, then connect it.
    Connect {
        /// Node name from `[node.<name>]`.
        node: String,
    },
    /// Disconnect the node, then run its stop hook.
    Disconnect {
        /// Node name from `[node.<name>]`.
        node: String,
    },
}

impl CliCommand {
    /// The node the operation targets.
    pub fn node(&self) -> &str {
        match self {
            CliCommand::Connect { node } => node,
            CliCommand::Disconnect { node } => node,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
