// src/controller/state.rs

//! Pure lifecycle phase machine.
//!
//! This module contains a synchronous, deterministic view of where one
//! session is in the hook/connect lifecycle. The async controller in
//! [`lifecycle`](super::lifecycle) feeds events into it as it works; the
//! transitions can be unit tested without Tokio, processes, or sinks.

/// Position of one session in the hook/connect lifecycle.
///
/// The connect branch is `Idle → StartHookRunning → Connecting →
/// Connected`, with `StartHookFailed` as the failure terminal. The
/// teardown branch is `Connected → Disconnecting → StopHookRunning →
/// Disconnected`; a failing stop hook still reaches `Disconnected`, which
/// is why the teardown branch has no failure terminal of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    StartHookRunning,
    Connecting,
    Connected,
    StartHookFailed,
    Disconnecting,
    StopHookRunning,
    Disconnected,
}

/// Lifecycle events the controller feeds into the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    StartHookStarted,
    StartHookFailed,
    ConnectStarted,
    ConnectSucceeded,
    DisconnectStarted,
    DelegateDisconnected,
    StopHookFinished,
}

impl SessionPhase {
    /// Apply one lifecycle event.
    ///
    /// Total: events that make no sense for the current phase leave it
    /// unchanged. `DisconnectStarted` is accepted from any phase because
    /// repeated disconnects re-enter the teardown branch; deduplicating
    /// them is the caller's responsibility, not the controller's.
    pub fn on(self, event: LifecycleEvent) -> SessionPhase {
        use LifecycleEvent as E;
        use SessionPhase::*;

        match (self, event) {
            (Idle | Disconnected | StartHookFailed, E::StartHookStarted) => StartHookRunning,
            (StartHookRunning, E::StartHookFailed) => StartHookFailed,
            (Idle | Disconnected | StartHookFailed | StartHookRunning, E::ConnectStarted) => {
                Connecting
            }
            (Connecting, E::ConnectSucceeded) => Connected,
            (_, E::DisconnectStarted) => Disconnecting,
            (Disconnecting, E::DelegateDisconnected) => StopHookRunning,
            (StopHookRunning, E::StopHookFinished) => Disconnected,
            (phase, _) => phase,
        }
    }
}
