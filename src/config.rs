//! Session configuration
//!
//! Starting capacities for the arena and the undo depth for the command
//! history. Loaded from YAML; every field falls back to its default.

use crate::graph::{DEFAULT_EDGE_CAPACITY, DEFAULT_NODE_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Default maximum number of undoable commands
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 100;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Arena and history settings for one editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Node slots allocated up front
    pub initial_node_capacity: usize,
    /// Edge slots allocated up front
    pub initial_edge_capacity: usize,
    /// Undo stack depth; older entries are dropped silently
    pub max_history_depth: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_node_capacity: DEFAULT_NODE_CAPACITY,
            initial_edge_capacity: DEFAULT_EDGE_CAPACITY,
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: ArenaConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        info!("Loaded arena configuration from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_history_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_history_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
