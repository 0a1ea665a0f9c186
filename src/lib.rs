// src/lib.rs

pub mod cli;
pub mod config;
pub mod connector;
pub mod controller;
pub mod errors;
pub mod hook;
pub mod launch;
pub mod logging;
pub mod sink;
pub mod types;

use std::sync::Arc;

use tracing::info;

use crate::cli::{CliArgs, CliCommand};
use crate::config::loader::load_and_validate;
use crate::config::{ConfigFile, NodeConfig};
use crate::connector::{CommandConnector, NodeConnector, NodeSession, NoopConnector};
use crate::controller::HookedConnector;
use crate::errors::{NodehookError, Result};
use crate::hook::HookConfig;
use crate::launch::{HostContext, ManagementContext};
use crate::sink::{SharedSink, StdoutSink};
use crate::types::ConnectorKind;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - controller construction for the targeted node
/// - the requested lifecycle operation
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let node_name = args.command.node().to_string();
    let node = cfg
        .node
        .get(&node_name)
        .ok_or_else(|| NodehookError::NodeNotFound(node_name.clone()))?;

    let context: Arc<dyn ManagementContext> = Arc::new(match cfg.config.shell.clone() {
        Some(shell) => HostContext::with_shell(shell),
        None => HostContext::new(),
    });

    let controller = build_controller(node, &cfg, Arc::clone(&context));
    let session = build_session(&node_name, node);
    let sink: SharedSink = Arc::new(StdoutSink);

    match args.command {
        CliCommand::Connect { .. } => {
            tokio::select! {
                res = controller.connect(&session, Arc::clone(&sink)) => res,
                _ = tokio::signal::ctrl_c() => {
                    info!(node = %session.name, "interrupted; aborting connect");
                    Err(NodehookError::Interrupted)
                }
            }
        }
        CliCommand::Disconnect { .. } => {
            tokio::select! {
                () = controller.disconnect(&session, Arc::clone(&sink)) => Ok(()),
                _ = tokio::signal::ctrl_c() => {
                    info!(node = %session.name, "interrupted; aborting disconnect");
                    Err(NodehookError::Interrupted)
                }
            }
        }
    }
}

/// Build the hooked controller for one node definition.
///
/// Hook defaults from `[default]` are merged here; the connector is
/// picked from the node's `connector` kind.
pub fn build_controller(
    node: &NodeConfig,
    cfg: &ConfigFile,
    context: Arc<dyn ManagementContext>,
) -> HookedConnector {
    let hooks = HookConfig::new(
        node.effective_start_command(&cfg.default),
        node.effective_stop_command(&cfg.default),
    );

    let inner: Box<dyn NodeConnector> = match node.connector {
        ConnectorKind::Command => Box::new(CommandConnector::new(
            Arc::clone(&context),
            node.connect_command.clone().unwrap_or_default(),
            node.disconnect_command.clone(),
        )),
        ConnectorKind::Noop => Box::new(NoopConnector),
    };

    HookedConnector::new(hooks, inner, context)
}

/// Build the session identity for one node definition.
pub fn build_session(name: &str, node: &NodeConfig) -> NodeSession {
    NodeSession {
        name: name.to_string(),
        description: node.description.clone(),
        labels: node.labels.clone(),
        executors: node.executors,
    }
}

/// Simple dry-run output: print nodes, hooks and connectors.
fn print_dry_run(cfg: &ConfigFile) {
    println!("nodehook dry-run");
    if let Some(ref shell) = cfg.config.shell {
        println!("  config.shell = {shell}");
    }
    println!();

    println!("nodes ({}):", cfg.node.len());
    for (name, node) in cfg.node.iter() {
        println!("  - {name}");
        if !node.description.is_empty() {
            println!("      description: {}", node.description);
        }
        if !node.labels.is_empty() {
            println!("      labels: {:?}", node.labels);
        }
        println!("      executors: {}", node.executors);
        if let Some(cmd) = node.effective_start_command(&cfg.default) {
            println!("      start_command: {cmd}");
        }
        if let Some(cmd) = node.effective_stop_command(&cfg.default) {
            println!("      stop_command: {cmd}");
        }
        println!("      connector: {:?}", node.connector);
        if let Some(ref cmd) = node.connect_command {
            println!("      connect_command: {cmd}");
        }
        if let Some(ref cmd) = node.disconnect_command {
            println!("      disconnect_command: {cmd}");
        }
    }
}
