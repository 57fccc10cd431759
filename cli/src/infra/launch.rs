//! Launch-option sink writing the shared `java-opts` accumulator file.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::LaunchOptionSink;
use crate::domain::launch::LaunchFlag;
use crate::domain::sandbox::{BUILDPACK_DIR, JAVA_OPTS_FILE};

/// Appends one rendered flag per line to `<build_dir>/.java-buildpack/java-opts`.
///
/// The file is shared with every other component that contributes launch
/// flags; this sink only ever appends, creating the file (and the buildpack
/// directory) when it happens to be the first contributor.
pub struct JavaOptsFile {
    path: PathBuf,
}

impl JavaOptsFile {
    #[must_use]
    pub fn for_build(build_dir: &Path) -> Self {
        Self {
            path: build_dir.join(BUILDPACK_DIR).join(JAVA_OPTS_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        writeln!(file, "{line}").with_context(|| format!("appending to {}", self.path.display()))
    }
}

impl LaunchOptionSink for JavaOptsFile {
    fn add_system_property(&self, key: &str, value: &str) -> Result<()> {
        self.append_line(
            &LaunchFlag::SystemProperty {
                key: key.to_string(),
                value: value.to_string(),
            }
            .render(),
        )
    }

    fn add_preformatted(&self, flag: &str) -> Result<()> {
        self.append_line(flag)
    }

    fn add_agent(&self, jar_path: &str) -> Result<()> {
        self.append_line(&LaunchFlag::JavaAgent(jar_path.to_string()).render())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
