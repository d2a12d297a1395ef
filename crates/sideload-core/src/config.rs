//! Runtime configuration
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```yaml
//! send_related_model: true
//! load_default_ok_response: true
//! list_without_associations: pass_through   # or: empty, reject
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SideloadError};

/// Handling of a list of primary records when no associations are declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPolicy {
    /// Emit the records unflattened
    #[default]
    PassThrough,
    /// Emit an empty primary array
    Empty,
    /// Fail with `UnflattenedList`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SideloadConfig {
    /// Side-load to-one related entities; when off they are sent as ids only
    pub send_related_model: bool,
    /// Answer `ok` responses with the unflattened primary payload
    pub load_default_ok_response: bool,
    pub list_without_associations: ListPolicy,
}

impl Default for SideloadConfig {
    fn default() -> Self {
        Self {
            send_related_model: true,
            load_default_ok_response: true,
            list_without_associations: ListPolicy::PassThrough,
        }
    }
}

impl SideloadConfig {
    /// # Errors
    ///
    /// Returns `InvalidConfig` on malformed YAML or unknown keys.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SideloadError::InvalidConfig {
            reason: format!("YAML parse error: {}", e),
        })
    }

    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `InvalidConfig` if it does
    /// not parse.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SideloadError::Io {
            message: format!("Failed to read config {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }
}
