// src/hook.rs

//! Hook configuration and execution.
//!
//! A hook is a command executed on the controlling host at a fixed point
//! in a node's connect/disconnect lifecycle. This module only runs the
//! command and reports what happened as a value; whether a failed hook is
//! fatal is the caller's policy.

use std::sync::Arc;

use tracing::warn;

use crate::launch::ManagementContext;
use crate::sink::SharedSink;
use crate::types::HookOutcome;

/// Start/stop commands for one node, fixed at configuration time.
///
/// Empty and whitespace-only commands are normalised to "no hook" at
/// construction, so both render as an explicit no-op later on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookConfig {
    start_command: Option<String>,
    stop_command: Option<String>,
}

impl HookConfig {
    pub fn new(start_command: Option<String>, stop_command: Option<String>) -> Self {
        Self {
            start_command: normalize(start_command),
            stop_command: normalize(stop_command),
        }
    }

    pub fn start_command(&self) -> Option<&str> {
        self.start_command.as_deref()
    }

    pub fn stop_command(&self) -> Option<&str> {
        self.stop_command.as_deref()
    }
}

fn normalize(cmd: Option<String>) -> Option<String> {
    cmd.filter(|c| !c.trim().is_empty())
}

/// Run one hook command, if there is one to run.
///
/// - No command configured: explicit no-op, noticed on the sink.
/// - Management context unavailable: fail-open — noticed on the sink,
///   warned on the diagnostic stream, and the hook is skipped.
/// - Otherwise the command runs to completion through the context's
///   launcher, with its output streamed to the sink; the exit status
///   comes back as a value. `Err` means the process could not be spawned
///   at all.
pub async fn run_hook(
    context: &dyn ManagementContext,
    command: Option<&str>,
    sink: &SharedSink,
) -> std::io::Result<HookOutcome> {
    let Some(command) = command else {
        sink.line("No command to be executed for this on-demand node.");
        return Ok(HookOutcome::SkippedEmpty);
    };

    let Some(launcher) = context.launcher() else {
        warn!(cmd = %command, "management context unavailable; skipping hook");
        sink.line("Management context is not ready... doing nothing.");
        return Ok(HookOutcome::SkippedUnavailable);
    };

    let outcome = launcher.run(command, Arc::clone(sink)).await?;
    Ok(HookOutcome::Ran(outcome))
}
