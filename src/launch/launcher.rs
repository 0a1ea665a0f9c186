// src/launch/launcher.rs

//! Launcher and management-context capability traits.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::sink::SharedSink;
use crate::types::ExecutionOutcome;

use super::shell::ShellLauncher;

/// Capability to run one command line on the controlling host.
///
/// Implementations stream the command's stdout/stderr to the sink as
/// lines, in the order produced, and resolve only once the process has
/// exited and its output is fully drained. Failure to spawn at all is the
/// `Err` case; a process that ran and exited non-zero is an `Ok` outcome
/// with `succeeded == false`.
pub trait CommandLauncher: Send + Sync {
    fn run<'a>(
        &'a self,
        command: &'a str,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<ExecutionOutcome>> + Send + 'a>>;
}

/// Capability to hand out a command launcher.
///
/// `None` means the management layer cannot provide one right now (e.g.
/// it is shutting down); callers decide how to proceed. The launcher is
/// resolved per call and never cached.
pub trait ManagementContext: Send + Sync {
    fn launcher(&self) -> Option<Arc<dyn CommandLauncher>>;
}

/// Production management context: always provides a [`ShellLauncher`].
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    shell: Option<String>,
}

impl HostContext {
    pub fn new() -> Self {
        Self { shell: None }
    }

    /// Override the shell used to interpret command lines
    /// (`[config] shell`).
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }
}

impl ManagementContext for HostContext {
    fn launcher(&self) -> Option<Arc<dyn CommandLauncher>> {
        Some(Arc::new(ShellLauncher::new(self.shell.clone())))
    }
}
