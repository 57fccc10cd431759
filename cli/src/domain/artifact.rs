//! Artifact sources and download-location rules.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use cxpack_common::ServiceBinding;
use serde::{Deserialize, Serialize};

use crate::domain::config::{AcquireSource, AgentConfig};
use crate::domain::error::{BindingError, ConfigError};

// ── Constants ────────────────────────────────────────────────────────────────

/// Credential key on the bound service naming the IAST server.
pub const SERVER_CREDENTIAL_KEY: &str = "iast_server";

/// Fixed path of the compilation artifact on the IAST server.
pub const COMPILATION_DOWNLOAD_PATH: &str = "/iast/compilation/download/JAVA";

/// Cache-relative name for archives fetched from the bound server. The server
/// exposes no version identity, so there is exactly one slot.
pub const SERVER_ARCHIVE_NAME: &str = "cx-iast-agent-latest.tar.gz";

// ── Catalog entries ──────────────────────────────────────────────────────────

/// A pinned agent build an operator can configure instead of the bound server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Agent version, used for cache naming and build-log messages.
    pub version: String,
    /// Download location of the archive.
    pub uri: String,
    /// Expected SHA-256 of the archive, lowercase or uppercase hex.
    pub sha256: String,
}

impl CatalogEntry {
    /// Cache-relative file name for this entry's archive.
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("cx-iast-agent-{}.tar.gz", self.version)
    }

    /// Check the entry is usable before any network traffic happens.
    ///
    /// # Errors
    ///
    /// Returns an error when a field is empty or the checksum is not 64 hex
    /// characters.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::EmptyCatalogField { field: "version" }.into());
        }
        if self.uri.trim().is_empty() {
            return Err(ConfigError::EmptyCatalogField { field: "uri" }.into());
        }
        if !is_sha256_hex(&self.sha256) {
            return Err(ConfigError::InvalidChecksum {
                value: self.sha256.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// Whether a string is a plausible SHA-256 digest (64 hex characters).
#[must_use]
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

// ── Artifact sources ─────────────────────────────────────────────────────────

/// Where the agent archive for this build comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactSource {
    /// A pinned catalog entry; cacheable and checksum-verified.
    Catalog(CatalogEntry),
    /// The compilation artifact of the bound IAST server; always re-fetched.
    Server { url: String },
}

impl ArtifactSource {
    /// Download location of the archive.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Catalog(entry) => &entry.uri,
            Self::Server { url } => url,
        }
    }

    /// Human-readable version for build-log messages.
    #[must_use]
    pub fn version_label(&self) -> &str {
        match self {
            Self::Catalog(entry) => &entry.version,
            Self::Server { .. } => "server-provided",
        }
    }

    /// Cache-relative file name for the downloaded archive.
    #[must_use]
    pub fn archive_name(&self) -> String {
        match self {
            Self::Catalog(entry) => entry.archive_name(),
            Self::Server { .. } => SERVER_ARCHIVE_NAME.to_string(),
        }
    }
}

/// Build the compilation-artifact URL for a bound server.
///
/// The path is fixed by the server's API. The server value is used as given,
/// minus any trailing slash; no scheme or host rewriting happens here.
#[must_use]
pub fn compilation_download_url(server: &str) -> String {
    format!("{}{COMPILATION_DOWNLOAD_PATH}", server.trim_end_matches('/'))
}

/// Decide where the agent archive comes from for this build.
///
/// # Errors
///
/// Returns an error when the configured source is `catalog` but no entry is
/// configured, or when it is `server` and the binding lacks a string
/// `iast_server` credential.
pub fn resolve_source(config: &AgentConfig, binding: &ServiceBinding) -> Result<ArtifactSource> {
    match config.source {
        AcquireSource::Catalog => config
            .catalog
            .clone()
            .map(ArtifactSource::Catalog)
            .ok_or_else(|| ConfigError::MissingCatalog.into()),
        AcquireSource::Server => {
            let server = binding
                .credential_str(SERVER_CREDENTIAL_KEY)
                .ok_or(BindingError::MissingCredential {
                    key: SERVER_CREDENTIAL_KEY,
                })?;
            Ok(ArtifactSource::Server {
                url: compilation_download_url(server),
            })
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
