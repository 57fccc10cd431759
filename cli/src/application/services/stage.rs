//! Stage phase — acquire the agent archive and populate the sandbox.
//!
//! Imports only from `crate::domain`, `crate::application::ports`, and
//! `cxpack_common`. All I/O is routed through injected port traits, except
//! the extraction scratch directory, which comes from `tempfile`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use cxpack_common::ActivationFilter;
use serde::Serialize;

use crate::application::ports::{
    ArchiveExtractor, ArtifactFetcher, BuildLog, FileHasher, NetworkGate, ServiceRegistry,
    StagingFs,
};
use crate::application::services::detect::{Detection, detect_agent};
use crate::domain::artifact::{ArtifactSource, CatalogEntry, resolve_source};
use crate::domain::config::AgentConfig;
use crate::domain::error::StageError;
use crate::domain::sandbox::{LAUNCHER_JAR, OVERRIDE_PROPERTIES_FILE, Sandbox};

// ── Public types ──────────────────────────────────────────────────────────────

/// Per-invocation inputs of the stage phase.
pub struct StageOptions<'a> {
    pub filter: &'a ActivationFilter,
    pub config: &'a AgentConfig,
    pub sandbox: &'a Sandbox,
    /// Platform-provided cache directory, persisted across builds.
    pub cache_dir: &'a Path,
}

/// Outcome of the stage phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Sandbox populated with the given agent version.
    Staged { version: String },
    /// No applicable binding; the build proceeds without the agent.
    Skipped,
}

/// Provenance note written next to a cached catalog archive.
#[derive(Serialize)]
struct ArchiveProvenance<'a> {
    version: &'a str,
    sha256: &'a str,
    source: &'a str,
    downloaded_at: DateTime<Utc>,
}

// ── Stage service ─────────────────────────────────────────────────────────────

/// Run the stage phase end to end.
///
/// Detection runs first; a non-applicable build returns `Skipped` without
/// touching the filesystem. Acquisition depends on the configured source:
/// catalog archives are cached and checksum-verified, server archives are
/// fetched fresh every build because the server exposes no version identity.
/// Extraction lands in a scratch directory next to the sandbox and is
/// swapped in with a rename, so a failed stage never leaves a partial
/// sandbox behind.
///
/// # Errors
///
/// Returns an error when the configuration is invalid, the binding lacks a
/// usable `iast_server` credential under the server source, the download
/// attempts are exhausted, the archive fails verification, or extraction
/// fails.
pub fn stage_agent(
    registry: &impl ServiceRegistry,
    fetcher: &impl ArtifactFetcher,
    extractor: &impl ArchiveExtractor,
    gate: &impl NetworkGate,
    fs: &(impl StagingFs + FileHasher),
    log: &impl BuildLog,
    opts: &StageOptions<'_>,
) -> Result<StageOutcome> {
    let Detection::Applicable { binding } = detect_agent(registry, opts.filter, log) else {
        log.debug("stage: agent not applicable, nothing to do");
        return Ok(StageOutcome::Skipped);
    };

    opts.config
        .validate()
        .context("validating agent configuration")?;
    let source = resolve_source(opts.config, &binding)?;
    log.debug(&format!("acquiring agent archive from {}", source.url()));

    let archive = acquire(fetcher, gate, fs, log, opts, &source)?;
    populate_sandbox(extractor, fs, log, opts.sandbox, &archive)?;

    log.success(&format!(
        "IAST agent ({}) staged into sandbox",
        source.version_label()
    ));
    Ok(StageOutcome::Staged {
        version: source.version_label().to_string(),
    })
}

// ── Acquisition ───────────────────────────────────────────────────────────────

fn acquire(
    fetcher: &impl ArtifactFetcher,
    gate: &impl NetworkGate,
    fs: &(impl StagingFs + FileHasher),
    log: &impl BuildLog,
    opts: &StageOptions<'_>,
    source: &ArtifactSource,
) -> Result<PathBuf> {
    fs.create_dir_all(opts.cache_dir)
        .context("creating download cache directory")?;
    let dest = opts.cache_dir.join(source.archive_name());

    match source {
        ArtifactSource::Catalog(entry) => {
            acquire_catalog(fetcher, gate, fs, log, opts.config.attempts, entry, &dest)?;
        }
        ArtifactSource::Server { url } => {
            log.step("downloading agent from the bound IAST server");
            gate.with_endpoint(url, || {
                download(fetcher, log, url, &dest, opts.config.attempts)
            })?;
        }
    }
    Ok(dest)
}

fn acquire_catalog(
    fetcher: &impl ArtifactFetcher,
    gate: &impl NetworkGate,
    fs: &(impl StagingFs + FileHasher),
    log: &impl BuildLog,
    attempts: u32,
    entry: &CatalogEntry,
    dest: &Path,
) -> Result<()> {
    if fs.exists(dest) {
        let actual = fs
            .sha256_file(dest)
            .context("hashing cached agent archive")?;
        if actual.eq_ignore_ascii_case(&entry.sha256) {
            log.step(&format!("agent {} found in cache", entry.version));
            return Ok(());
        }
        log.warn("cached agent archive does not match the pinned checksum; refetching");
        fs.remove_file(dest).context("dropping stale cache entry")?;
    }

    log.step(&format!("downloading agent {}", entry.version));
    gate.with_endpoint(&entry.uri, || {
        download(fetcher, log, &entry.uri, dest, attempts)
    })?;

    let actual = fs
        .sha256_file(dest)
        .context("hashing downloaded agent archive")?;
    if !actual.eq_ignore_ascii_case(&entry.sha256) {
        fs.remove_file(dest).context("dropping corrupt download")?;
        return Err(StageError::ChecksumMismatch {
            url: entry.uri.clone(),
            expected: entry.sha256.to_lowercase(),
            actual,
        }
        .into());
    }

    write_provenance(fs, entry, dest)?;
    Ok(())
}

fn download(
    fetcher: &impl ArtifactFetcher,
    log: &impl BuildLog,
    url: &str,
    dest: &Path,
    attempts: u32,
) -> Result<()> {
    let mut last_error = String::new();
    for attempt in 1..=attempts {
        match fetcher.fetch(url, dest) {
            Ok(()) => return Ok(()),
            Err(err) => {
                last_error = format!("{err:#}");
                if attempt < attempts {
                    log.warn(&format!(
                        "download attempt {attempt}/{attempts} failed: {last_error}"
                    ));
                }
            }
        }
    }
    Err(StageError::DownloadFailed {
        url: url.to_string(),
        attempts,
        reason: last_error,
    }
    .into())
}

fn write_provenance(fs: &impl StagingFs, entry: &CatalogEntry, archive: &Path) -> Result<()> {
    let note = ArchiveProvenance {
        version: &entry.version,
        sha256: &entry.sha256,
        source: &entry.uri,
        downloaded_at: Utc::now(),
    };
    let body = serde_json::to_string_pretty(&note).context("serializing cache provenance")?;
    fs.write(&provenance_path(archive), &body)
        .context("writing cache provenance")
}

/// `<archive>.json`, next to the archive itself.
fn provenance_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

// ── Sandbox population ────────────────────────────────────────────────────────

fn populate_sandbox(
    extractor: &impl ArchiveExtractor,
    fs: &impl StagingFs,
    log: &impl BuildLog,
    sandbox: &Sandbox,
    archive: &Path,
) -> Result<()> {
    let parent = sandbox
        .dir
        .parent()
        .ok_or_else(|| anyhow!("sandbox directory {} has no parent", sandbox.dir.display()))?;
    fs.create_dir_all(parent)
        .context("creating buildpack directory")?;

    // Unpack beside the sandbox so the final rename stays on one filesystem.
    let scratch = tempfile::Builder::new()
        .prefix(".cx-agent-unpack")
        .tempdir_in(parent)
        .context("creating extraction scratch directory")?;
    let unpacked = scratch.path().join("agent");
    extractor.unpack(archive, &unpacked, true)?;

    if !fs.exists(&unpacked.join(LAUNCHER_JAR)) {
        return Err(StageError::CorruptArchive {
            path: archive.display().to_string(),
            reason: format!("no {LAUNCHER_JAR} at archive root"),
        }
        .into());
    }

    if fs.exists(&sandbox.dir) {
        log.debug("replacing sandbox left by a previous stage");
        fs.remove_dir_all(&sandbox.dir)
            .context("clearing previous sandbox")?;
    }
    fs.rename(&unpacked, &sandbox.dir)
        .context("moving agent into sandbox")?;

    if !fs.exists(&sandbox.overrides_path()) {
        log.warn(&format!(
            "agent archive did not provide {OVERRIDE_PROPERTIES_FILE}; release will fail"
        ));
    }
    Ok(())
}
