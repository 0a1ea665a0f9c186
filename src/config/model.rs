// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::ConnectorKind;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// shell = "bash"
///
/// [default]
/// start_command = "scripts/provision.sh"
/// stop_command = "scripts/teardown.sh"
///
/// [node.agent-1]
/// description = "spot VM"
/// labels = ["linux", "x86_64"]
/// executors = 2
/// connector = "command"
/// connect_command = "ssh agent-1 run-agent"
/// disconnect_command = "ssh agent-1 stop-agent"
/// ```
///
/// All sections except `[node.<name>]` are optional and have reasonable
/// defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Hook defaults from `[default]`.
    #[serde(default)]
    pub default: DefaultSection,

    /// All nodes from `[node.<name>]`.
    ///
    /// Keys are the *node names* (e.g. `"agent-1"`).
    #[serde(default)]
    pub node: BTreeMap<String, NodeConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// Shell used to interpret hook and connector command lines.
    ///
    /// Platform default (`sh` on Unix, `cmd` on Windows) when unset.
    #[serde(default)]
    pub shell: Option<String>,
}

/// `[default]` section.
///
/// Hook commands applied to nodes that do not set their own.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultSection {
    #[serde(default)]
    pub start_command: Option<String>,

    #[serde(default)]
    pub stop_command: Option<String>,
}

/// `[node.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// Human-readable description, carried on the session.
    #[serde(default)]
    pub description: String,

    /// Labels the host scheduler may match on; carried as data only.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Number of concurrent jobs the node accepts.
    #[serde(default = "default_executors")]
    pub executors: u32,

    /// Command run on the controlling host before connecting the node.
    #[serde(default)]
    pub start_command: Option<String>,

    /// Command run on the controlling host after disconnecting the node.
    #[serde(default)]
    pub stop_command: Option<String>,

    /// If false, `[default]` hook commands are not applied to this node.
    #[serde(default = "default_true")]
    pub inherit_default_hooks: bool,

    /// How the session is established once the start hook has run.
    #[serde(default)]
    pub connector: ConnectorKind,

    /// Connect command for `connector = "command"`.
    #[serde(default)]
    pub connect_command: Option<String>,

    /// Disconnect command for `connector = "command"`; optional.
    #[serde(default)]
    pub disconnect_command: Option<String>,
}

fn default_executors() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            description: String::new(),
            labels: Vec::new(),
            executors: default_executors(),
            start_command: None,
            stop_command: None,
            inherit_default_hooks: true,
            connector: ConnectorKind::default(),
            connect_command: None,
            disconnect_command: None,
        }
    }
}

impl NodeConfig {
    /// Effective start command after `[default]` merging.
    pub fn effective_start_command(&self, defaults: &DefaultSection) -> Option<String> {
        effective_hook(
            &self.start_command,
            &defaults.start_command,
            self.inherit_default_hooks,
        )
    }

    /// Effective stop command after `[default]` merging.
    pub fn effective_stop_command(&self, defaults: &DefaultSection) -> Option<String> {
        effective_hook(
            &self.stop_command,
            &defaults.stop_command,
            self.inherit_default_hooks,
        )
    }
}

/// A node's own non-empty command wins; otherwise the default applies,
/// unless the node opted out of inheriting defaults.
fn effective_hook(own: &Option<String>, default: &Option<String>, inherit: bool) -> Option<String> {
    match own {
        Some(cmd) if !cmd.trim().is_empty() => Some(cmd.clone()),
        _ if inherit => default.clone().filter(|c| !c.trim().is_empty()),
        _ => None,
    }
}

/// Validated configuration.
///
/// Obtained via `ConfigFile::try_from(raw)`; see `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub default: DefaultSection,
    pub node: BTreeMap<String, NodeConfig>,
}

impl ConfigFile {
    /// Construct without validation; prefer `ConfigFile::try_from(raw)`.
    pub fn new_unchecked(
        config: ConfigSection,
        default: DefaultSection,
        node: BTreeMap<String, NodeConfig>,
    ) -> Self {
        Self {
            config,
            default,
            node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DefaultSection {
        DefaultSection {
            start_command: Some("default-up.sh".to_string()),
            stop_command: Some("default-down.sh".to_string()),
        }
    }

    #[test]
    fn node_commands_win_over_defaults() {
        let node = NodeConfig {
            start_command: Some("up.sh".to_string()),
            ..NodeConfig::default()
        };
        assert_eq!(
            node.effective_start_command(&defaults()),
            Some("up.sh".to_string())
        );
        assert_eq!(
            node.effective_stop_command(&defaults()),
            Some("default-down.sh".to_string())
        );
    }

    #[test]
    fn empty_node_command_falls_back_to_default() {
        let node = NodeConfig {
            start_command: Some("".to_string()),
            ..NodeConfig::default()
        };
        assert_eq!(
            node.effective_start_command(&defaults()),
            Some("default-up.sh".to_string())
        );
    }

    #[test]
    fn opting_out_disables_default_hooks() {
        let node = NodeConfig {
            inherit_default_hooks: false,
            ..NodeConfig::default()
        };
        assert_eq!(node.effective_start_command(&defaults()), None);
        assert_eq!(node.effective_stop_command(&defaults()), None);
    }
}
