use std::str::FromStr;
use serde::Deserialize;

/// How a node's session is established once the start hook has run.
///
/// - `Noop`: the session comes up out of band (e.g. the node dials in on
///   its own once provisioned); connect/disconnect only log (default).
/// - `Command`: run configured connect/disconnect commands on the
///   controlling host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Noop,
    Command,
}

impl Default for ConnectorKind {
    fn default() -> Self {
        ConnectorKind::Noop
    }
}

impl FromStr for ConnectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "noop" => Ok(ConnectorKind::Noop),
            "command" => Ok(ConnectorKind::Command),
            other => Err(format!(
                "invalid connector kind: {other} (expected \"noop\" or \"command\")"
            )),
        }
    }
}

/// Outcome of one hook or connector command execution.
///
/// Transient: produced per invocation, used only to decide whether to
/// proceed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub succeeded: bool,
}

impl ExecutionOutcome {
    pub fn from_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            succeeded: exit_code == 0,
        }
    }
}

/// How a single hook invocation resolved.
///
/// The skip variants are not errors: an empty command is an explicit no-op
/// and an unavailable management context is fail-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Ran(ExecutionOutcome),
    SkippedEmpty,
    SkippedUnavailable,
}
