//! Sandbox path layout — where the staged agent lives at build and run time.
//!
//! Pure path arithmetic only; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

// ── Constants ────────────────────────────────────────────────────────────────

/// Directory under the application root that buildpack components own.
pub const BUILDPACK_DIR: &str = ".java-buildpack";

/// This component's directory inside [`BUILDPACK_DIR`].
pub const SANDBOX_NAME: &str = "cx_iast_agent";

/// Where the droplet is mounted inside the runtime container.
pub const DEFAULT_APP_ROOT: &str = "/home/vcap/app";

/// The agent entry point the archive must provide.
pub const LAUNCHER_JAR: &str = "cx-launcher.jar";

/// Agent-shipped properties file the release phase appends to.
pub const OVERRIDE_PROPERTIES_FILE: &str = "cx_agent.override.properties";

/// Accumulator file (under [`BUILDPACK_DIR`]) collecting launch flags from
/// every component that contributes some.
pub const JAVA_OPTS_FILE: &str = "java-opts";

// ── Sandbox ──────────────────────────────────────────────────────────────────

/// The agent's private directory, seen from both sides of the staging fence.
///
/// `dir` is where staging writes on the build machine; `mount` is the same
/// directory as the JVM will see it once the droplet is mounted in the
/// runtime container. Launch flags must use `mount`, never `dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sandbox {
    /// Staging-time location under the build directory.
    pub dir: PathBuf,
    /// Runtime location inside the droplet container.
    pub mount: String,
}

impl Sandbox {
    /// Derive the sandbox for a build directory and runtime application root.
    #[must_use]
    pub fn for_build(build_dir: &Path, app_root: &str) -> Self {
        Self {
            dir: build_dir.join(BUILDPACK_DIR).join(SANDBOX_NAME),
            mount: format!(
                "{}/{BUILDPACK_DIR}/{SANDBOX_NAME}",
                app_root.trim_end_matches('/')
            ),
        }
    }

    /// Staging-time path of the override properties file.
    #[must_use]
    pub fn overrides_path(&self) -> PathBuf {
        self.dir.join(OVERRIDE_PROPERTIES_FILE)
    }

    /// Staging-time path of the launcher jar.
    #[must_use]
    pub fn launcher_path(&self) -> PathBuf {
        self.dir.join(LAUNCHER_JAR)
    }

    /// Runtime path of the launcher jar, for the `-javaagent` flag.
    #[must_use]
    pub fn launcher_mount(&self) -> String {
        format!("{}/{LAUNCHER_JAR}", self.mount)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
