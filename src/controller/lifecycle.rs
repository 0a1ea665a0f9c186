// src/controller/lifecycle.rs

//! The lifecycle hook controller.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use crate::connector::{NodeConnector, NodeSession};
use crate::errors::{NodehookError, Result};
use crate::hook::{run_hook, HookConfig};
use crate::launch::ManagementContext;
use crate::sink::SharedSink;
use crate::types::HookOutcome;

use super::state::{LifecycleEvent, SessionPhase};

/// Wraps a delegate connector and brackets its lifecycle with the start
/// and stop hooks: provision before use, clean up after release.
///
/// - `connect` runs the start hook first; a hook that exits non-zero or
///   cannot be spawned aborts the connect and the delegate is never
///   invoked. An absent hook or an unavailable management context is
///   noticed and skipped.
/// - `disconnect` delegates first, unconditionally, then attempts the
///   stop hook; stop-hook failures are written to the sink and swallowed,
///   since the node is already being removed from service.
///
/// The controller introduces no concurrency of its own: both operations
/// are plain awaits on the caller's task, and hook processes are killed
/// if that task is dropped mid-flight. Each node gets its own controller
/// instance; there is no shared state between them.
pub struct HookedConnector {
    hooks: HookConfig,
    inner: Box<dyn NodeConnector>,
    context: Arc<dyn ManagementContext>,
    phase: Mutex<SessionPhase>,
}

impl HookedConnector {
    pub fn new(
        hooks: HookConfig,
        inner: Box<dyn NodeConnector>,
        context: Arc<dyn ManagementContext>,
    ) -> Self {
        Self {
            hooks,
            inner,
            context,
            phase: Mutex::new(SessionPhase::Idle),
        }
    }

    /// Current position in the lifecycle, for observability.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.lock().unwrap()
    }

    fn advance(&self, event: LifecycleEvent) {
        let mut phase = self.phase.lock().unwrap();
        let next = phase.on(event);
        debug!(from = ?*phase, to = ?next, ?event, "lifecycle transition");
        *phase = next;
    }
}

impl NodeConnector for HookedConnector {
    fn connect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.advance(LifecycleEvent::StartHookStarted);

            match run_hook(self.context.as_ref(), self.hooks.start_command(), &sink).await {
                Ok(HookOutcome::Ran(outcome)) if !outcome.succeeded => {
                    self.advance(LifecycleEvent::StartHookFailed);
                    sink.line(&format!(
                        "Start command failed with return code {}.",
                        outcome.exit_code
                    ));
                    return Err(NodehookError::HookFailed(outcome.exit_code));
                }
                Ok(HookOutcome::Ran(_)) => {
                    sink.line("Start command executed successfully.");
                }
                Ok(HookOutcome::SkippedEmpty | HookOutcome::SkippedUnavailable) => {}
                Err(err) => {
                    self.advance(LifecycleEvent::StartHookFailed);
                    error!(
                        node = %session.name,
                        cmd = ?self.hooks.start_command(),
                        error = %err,
                        "start hook could not be started"
                    );
                    return Err(NodehookError::HookSpawn(err));
                }
            }

            self.advance(LifecycleEvent::ConnectStarted);
            self.inner.connect(session, sink).await?;
            self.advance(LifecycleEvent::ConnectSucceeded);
            Ok(())
        })
    }

    fn disconnect<'a>(
        &'a self,
        session: &'a NodeSession,
        sink: SharedSink,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            self.advance(LifecycleEvent::DisconnectStarted);
            self.inner.disconnect(session, Arc::clone(&sink)).await;
            self.advance(LifecycleEvent::DelegateDisconnected);

            let stop_command = self.hooks.stop_command().unwrap_or_default().to_string();
            match run_hook(self.context.as_ref(), self.hooks.stop_command(), &sink).await {
                Ok(HookOutcome::Ran(outcome)) if !outcome.succeeded => {
                    error!(
                        node = %session.name,
                        cmd = %stop_command,
                        exit_code = outcome.exit_code,
                        "stop hook failed"
                    );
                    sink.line(&format!(
                        "Failed executing command '{}' (exit code {}).",
                        stop_command, outcome.exit_code
                    ));
                }
                Ok(HookOutcome::Ran(_)) => {
                    sink.line("Stop command executed successfully.");
                }
                Ok(HookOutcome::SkippedEmpty | HookOutcome::SkippedUnavailable) => {}
                Err(err) => {
                    error!(
                        node = %session.name,
                        cmd = %stop_command,
                        error = %err,
                        "stop hook could not be started"
                    );
                    sink.line(&format!(
                        "Failed executing command '{stop_command}': {err}."
                    ));
                }
            }

            self.advance(LifecycleEvent::StopHookFinished);
        })
    }

    fn is_supported(&self) -> bool {
        self.inner.is_supported()
    }
}
