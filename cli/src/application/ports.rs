//! Port trait definitions — the application layer's view of the outside world.
//!
//! Production implementations live in `crate::infra`; the unit-test harness
//! provides recording mocks. Services receive ports as `&impl Trait`
//! parameters, so nothing here needs to be object safe.

use std::path::Path;

use anyhow::Result;
use cxpack_common::{ActivationFilter, ServiceBinding};

/// Read-side view of the platform's service bindings.
pub trait ServiceRegistry {
    /// All bindings whose name, label, or any tag matches the filter.
    fn bindings_matching(&self, filter: &ActivationFilter) -> Vec<ServiceBinding>;
}

/// Download a URL to a local file, replacing any previous content at `dest`.
///
/// Implementations must not leave a half-written file at `dest` on failure.
pub trait ArtifactFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Hash files without loading them wholly into memory.
pub trait FileHasher {
    /// Lowercase hex SHA-256 of the file's content.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

/// Unpack a downloaded agent archive into a directory.
pub trait ArchiveExtractor {
    /// Unpack `archive` into `dest`, creating `dest`. When `strip_top_level`
    /// is set and the archive holds exactly one top-level directory, its
    /// contents are lifted into `dest` directly.
    fn unpack(&self, archive: &Path, dest: &Path, strip_top_level: bool) -> Result<()>;
}

/// Availability policy for operator-provided network endpoints.
///
/// The staging pipeline never probes the IAST server itself; whatever
/// reachability bookkeeping the hosting platform wants lives behind this
/// seam. The production implementation simply runs the operation.
pub trait NetworkGate {
    fn with_endpoint<T>(&self, endpoint: &str, op: impl FnOnce() -> Result<T>) -> Result<T>;
}

/// Sink for launch flags contributed to the application's start command.
///
/// One call per flag, in contribution order. The sink owns the final
/// rendering and placement of the flags.
pub trait LaunchOptionSink {
    fn add_system_property(&self, key: &str, value: &str) -> Result<()>;
    fn add_preformatted(&self, flag: &str) -> Result<()>;
    fn add_agent(&self, jar_path: &str) -> Result<()>;
}

/// Build-log events the services emit while working.
pub trait BuildLog {
    /// Phase-internal detail, shown only in verbose runs.
    fn debug(&self, message: &str);
    /// A step the operator should see progressing.
    fn step(&self, message: &str);
    /// A completed phase outcome.
    fn success(&self, message: &str);
    /// Something odd that did not stop the phase.
    fn warn(&self, message: &str);
}

/// Filesystem operations the staging services need.
pub trait StagingFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Atomic within a filesystem; the staging swap relies on that.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Append to an existing file; fails when the file does not exist.
    fn append(&self, path: &Path, content: &str) -> Result<()>;
}
