//! Binder configuration stored as `sqlplace.config.json`.
//!
//! ```json
//! {
//!   "mode": "strict",
//!   "reject_excess_arguments": true
//! }
//! ```
//!
//! Both fields are optional; missing fields take the library defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BindError, Result};
use crate::mode::Mode;

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE: &str = "sqlplace.config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Coercion policy for every placeholder.
    pub mode: Mode,
    /// Treat arguments left over after the last placeholder as an error.
    pub reject_excess_arguments: bool,
}

impl BinderConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BindError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| BindError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| BindError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
