//! # Client Configuration
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables.
//!
//! ```yaml
//! api_base_url: "https://finance.example.com/api"
//! recent_transaction_limit: 5
//! log_level: "info"
//! ```
//!
//! | Variable | Overrides |
//! |---|---|
//! | `FINANCE_API_BASE` | `api_base_url` |
//! | `FINANCE_LOG_LEVEL` | `log_level` |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::services::http::DEFAULT_API_BASE;

pub const API_BASE_VAR: &str = "FINANCE_API_BASE";
pub const LOG_LEVEL_VAR: &str = "FINANCE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// How many transactions the overview lists
    pub recent_transaction_limit: usize,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            recent_transaction_limit: 5,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Read the YAML file if it exists; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ClientConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from a set of environment variables
    pub fn with_overrides(mut self, vars: &HashMap<String, String>) -> Self {
        if let Some(base) = vars.get(API_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = base.trim().to_string();
        }
        if let Some(level) = vars.get(LOG_LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
        self
    }

    /// File first, then the process environment
    pub fn load(path: &Path) -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Ok(Self::from_file(path)?.with_overrides(&vars))
    }
}
