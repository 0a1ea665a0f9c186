#![allow(dead_code)]

use std::collections::BTreeMap;

use nodehook::config::{ConfigFile, ConfigSection, DefaultSection, NodeConfig, RawConfigFile};
use nodehook::types::ConnectorKind;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                default: DefaultSection::default(),
                node: BTreeMap::new(),
            },
        }
    }

    pub fn with_node(mut self, name: &str, node: NodeConfig) -> Self {
        self.config.node.insert(name.to_string(), node);
        self
    }

    pub fn with_shell(mut self, shell: &str) -> Self {
        self.config.config.shell = Some(shell.to_string());
        self
    }

    pub fn with_default_start_command(mut self, cmd: &str) -> Self {
        self.config.default.start_command = Some(cmd.to_string());
        self
    }

    pub fn with_default_stop_command(mut self, cmd: &str) -> Self {
        self.config.default.stop_command = Some(cmd.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeConfig`.
pub struct NodeConfigBuilder {
    node: NodeConfig,
}

impl NodeConfigBuilder {
    pub fn new() -> Self {
        Self {
            node: NodeConfig::default(),
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.node.description = text.to_string();
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.node.labels.push(label.to_string());
        self
    }

    pub fn executors(mut self, count: u32) -> Self {
        self.node.executors = count;
        self
    }

    pub fn start_command(mut self, cmd: &str) -> Self {
        self.node.start_command = Some(cmd.to_string());
        self
    }

    pub fn stop_command(mut self, cmd: &str) -> Self {
        self.node.stop_command = Some(cmd.to_string());
        self
    }

    pub fn inherit_default_hooks(mut self, val: bool) -> Self {
        self.node.inherit_default_hooks = val;
        self
    }

    /// Switch to the command connector with the given connect command.
    pub fn command_connector(mut self, connect_cmd: &str) -> Self {
        self.node.connector = ConnectorKind::Command;
        self.node.connect_command = Some(connect_cmd.to_string());
        self
    }

    pub fn disconnect_command(mut self, cmd: &str) -> Self {
        self.node.disconnect_command = Some(cmd.to_string());
        self
    }

    pub fn build(self) -> NodeConfig {
        self.node
    }
}

impl Default for NodeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
