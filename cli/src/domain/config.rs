//! Domain types and validators for agent acquisition configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::artifact::CatalogEntry;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Default bound on download attempts per acquisition.
pub const DEFAULT_DOWNLOAD_ATTEMPTS: u32 = 3;

// ── Config schema ────────────────────────────────────────────────────────────

/// Agent acquisition settings, read from `config/cx_iast_agent.yml`.
///
/// Every field is optional in the file; an absent file means "all defaults",
/// which is the bound-server source with three download attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Where the agent archive comes from.
    pub source: AcquireSource,
    /// Download attempts per acquisition, at least 1.
    pub attempts: u32,
    /// Pinned build used when `source` is `catalog`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogEntry>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            source: AcquireSource::default(),
            attempts: DEFAULT_DOWNLOAD_ATTEMPTS,
            catalog: None,
        }
    }
}

/// Acquisition source selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AcquireSource {
    /// Download the compilation artifact from the bound IAST server.
    #[default]
    Server,
    /// Download the pinned catalog entry, with caching and verification.
    Catalog,
}

// ── Validators ───────────────────────────────────────────────────────────────

impl AgentConfig {
    /// Check the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error when `attempts` is zero, when the `catalog` source is
    /// selected without an entry, or when a present catalog entry is invalid.
    /// A catalog entry is validated even under the `server` source so typos
    /// surface regardless of the selector.
    pub fn validate(&self) -> Result<()> {
        if self.attempts < 1 {
            return Err(ConfigError::InvalidAttempts {
                value: self.attempts,
            }
            .into());
        }
        match (&self.source, &self.catalog) {
            (AcquireSource::Catalog, None) => Err(ConfigError::MissingCatalog.into()),
            (_, Some(entry)) => entry.validate(),
            (AcquireSource::Server, None) => Ok(()),
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
