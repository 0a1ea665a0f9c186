// src/config/validate.rs

use crate::config::model::{ConfigFile, NodeConfig, RawConfigFile};
use crate::errors::{NodehookError, Result};
use crate::types::ConnectorKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::NodehookError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.default, raw.node))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_nodes(cfg)?;
    for (name, node) in cfg.node.iter() {
        validate_node(name, node)?;
    }
    Ok(())
}

fn ensure_has_nodes(cfg: &RawConfigFile) -> Result<()> {
    if cfg.node.is_empty() {
        return Err(NodehookError::ConfigError(
            "config must contain at least one [node.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_node(name: &str, node: &NodeConfig) -> Result<()> {
    if node.executors == 0 {
        return Err(NodehookError::ConfigError(format!(
            "node '{}' must have executors >= 1 (got 0)",
            name
        )));
    }

    match node.connector {
        ConnectorKind::Command => match node.connect_command.as_deref() {
            Some(cmd) if !cmd.trim().is_empty() => {}
            _ => {
                return Err(NodehookError::ConfigError(format!(
                    "node '{}' uses the command connector and must set a non-empty `connect_command`",
                    name
                )));
            }
        },
        ConnectorKind::Noop => {
            if node.connect_command.is_some() || node.disconnect_command.is_some() {
                return Err(NodehookError::ConfigError(format!(
                    "node '{}' sets connect/disconnect commands but `connector` is not \"command\"",
                    name
                )));
            }
        }
    }

    Ok(())
}
