//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Staging errors ────────────────────────────────────────────────────────────

/// Errors raised while acquiring and unpacking the agent archive.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Agent download failed after {attempts} attempts from {url}: {reason}")]
    DownloadFailed {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("Agent archive from {url} failed verification: expected sha256 {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("Agent archive {path} could not be unpacked: {reason}")]
    CorruptArchive { path: String, reason: String },
}

// ── Release errors ────────────────────────────────────────────────────────────

/// Errors raised while synthesizing the launch configuration.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Override properties file not found: {path}. Stage the agent before release.")]
    OverridesMissing { path: String },
}

// ── Binding errors ────────────────────────────────────────────────────────────

/// Errors raised when a matched service binding has the wrong credential shape.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Service binding credential '{key}' is missing or not a string.")]
    MissingCredential { key: &'static str },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised by agent configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Acquisition source is 'catalog' but no catalog entry is configured.")]
    MissingCatalog,

    #[error("attempts must be at least 1, got {value}")]
    InvalidAttempts { value: u32 },

    #[error("Catalog sha256 must be 64 hex characters, got '{value}'")]
    InvalidChecksum { value: String },

    #[error("Catalog entry field '{field}' must not be empty.")]
    EmptyCatalogField { field: &'static str },
}
