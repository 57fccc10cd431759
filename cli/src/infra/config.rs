//! Agent configuration loading from a YAML file on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::config::AgentConfig;

/// Environment override for the configuration file location.
pub const CONFIG_ENV_VAR: &str = "CXPACK_CONFIG";

/// Default location, relative to the working directory of the phase.
pub const DEFAULT_CONFIG_PATH: &str = "config/cx_iast_agent.yml";

/// Reads agent acquisition configuration from a YAML file.
///
/// An absent file is not an error — every deployment without an operator
/// override runs on the built-in defaults.
pub struct YamlConfigSource;

impl YamlConfigSource {
    /// Load from the resolved path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<AgentConfig> {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<AgentConfig> {
        if !path.exists() {
            return Ok(AgentConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Resolve the configuration file location.
    #[must_use]
    pub fn path() -> PathBuf {
        std::env::var(CONFIG_ENV_VAR)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
