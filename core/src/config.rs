/// Configuration for the content resolution engine.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::overlay::OverlayDefaults;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverOptions {
    /// When set, an all-digit path segment addresses an array index and
    /// intermediate containers are created as arrays. Turning this off makes
    /// every segment an object key, which protects documents that use
    /// literal numeric field names.
    pub infer_array_paths: bool,

    /// Repair `{"0": …, "1": …}` objects back into arrays when resolving
    /// sections. CMS round-trips of dotted-path writes produce these.
    pub repair_numeric_keys: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            infer_array_paths: true,
            repair_numeric_keys: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub resolver: ResolverOptions,
    pub overlay: OverlayDefaults,
}

impl EngineConfig {
    /// Load from a JSON string (for UI integration).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
