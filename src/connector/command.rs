// src/connector/command.rs

//! Connector that establishes the session by running configured commands.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{error, info};

use crate::errors::{NodehookError, Result};
use crate::launch::ManagementContext;
use crate::sink::SharedSink;

use super::{NodeConnector, NodeSession};

/// Runs a connect command to bring the node online and, optionally, a
/// disconnect command to tear the session down.
///
/// A connect command that exits non-zero or cannot be spawned fails the
/// connect. Disconnect command failures are logged and swallowed: the
/// node is already being released.
pub struct CommandConnector {
    context: Arc<dyn ManagementContext>,
    connect_command: String,
    disconnect_command: Option<String>,
}

impl CommandConnector {
    pub fn new(
        context: Arc<dyn ManagementContext>,
        connect_command: impl Into<String>,
        disconnect_command: Option<String>,
    ) -> Self {
        Self {
            context,
            connect_command: connect_command.into(),
            disconnect_command: disconnect_command.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl NodeConnector for CommandConnector {
    fn connect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let Some(launcher) = self.context.launcher() else {
                return Err(NodehookError::ManagementUnavailable);
            };

            info!(
                node = %session.name,
                cmd = %self.connect_command,
                "connecting node via command"
            );

            let outcome = launcher.run(&self.connect_command, Arc::clone(&sink)).await?;
            if !outcome.succeeded {
                return Err(NodehookError::ConnectCommandFailed {
                    cmd: self.connect_command.clone(),
                    code: outcome.exit_code,
                });
            }

            sink.line(&format!("Node '{}' connected.", session.name));
            Ok(())
        })
    }

    fn disconnect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let Some(cmd) = self.disconnect_command.as_deref() else {
                sink.line("No disconnect command configured for this node.");
                return;
            };

            let Some(launcher) = self.context.launcher() else {
                sink.line("Management context is not ready... doing nothing.");
                return;
            };

            match launcher.run(cmd, Arc::clone(&sink)).await {
                Ok(outcome) if outcome.succeeded => {
                    info!(node = %session.name, "node session torn down");
                }
                Ok(outcome) => {
                    error!(
                        node = %session.name,
                        cmd = %cmd,
                        exit_code = outcome.exit_code,
                        "disconnect command failed"
                    );
                    sink.line(&format!(
                        "Failed executing command '{}' (exit code {}).",
                        cmd, outcome.exit_code
                    ));
                }
                Err(err) => {
                    error!(
                        node = %session.name,
                        cmd = %cmd,
                        error = %err,
                        "disconnect command could not be started"
                    );
                    sink.line(&format!("Failed executing command '{cmd}': {err}."));
                }
            }
        })
    }
}
