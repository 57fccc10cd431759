//! Tar.gz extraction for downloaded agent archives.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use crate::application::ports::ArchiveExtractor;
use crate::domain::error::StageError;

/// Production extractor for the gzip-compressed tar archives the IAST
/// server and catalog mirrors ship.
pub struct TarGzExtractor;

impl ArchiveExtractor for TarGzExtractor {
    fn unpack(&self, archive: &Path, dest: &Path, strip_top_level: bool) -> Result<()> {
        let file =
            File::open(archive).with_context(|| format!("opening {}", archive.display()))?;
        std::fs::create_dir_all(dest)
            .with_context(|| format!("creating directory {}", dest.display()))?;

        let mut tar = tar::Archive::new(GzDecoder::new(file));
        tar.unpack(dest).map_err(|err| StageError::CorruptArchive {
            path: archive.display().to_string(),
            reason: err.to_string(),
        })?;

        if strip_top_level {
            strip_single_top_level(dest)?;
        }
        Ok(())
    }
}

/// If `dest` holds exactly one directory and nothing else, lift its contents
/// up and drop the wrapper. Archives built as `cx-iast-agent-1.2.3/...` and
/// flat archives both end up with the launcher at the destination root.
fn strip_single_top_level(dest: &Path) -> Result<()> {
    let entries: Vec<_> = std::fs::read_dir(dest)
        .with_context(|| format!("listing {}", dest.display()))?
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("listing {}", dest.display()))?;
    let [only] = entries.as_slice() else {
        return Ok(());
    };
    if !only.file_type().context("inspecting archive entry")?.is_dir() {
        return Ok(());
    }

    let wrapper = only.path();
    for child in
        std::fs::read_dir(&wrapper).with_context(|| format!("listing {}", wrapper.display()))?
    {
        let child = child.with_context(|| format!("listing {}", wrapper.display()))?;
        std::fs::rename(child.path(), dest.join(child.file_name()))
            .with_context(|| format!("lifting {} out of the wrapper", child.path().display()))?;
    }
    std::fs::remove_dir(&wrapper)
        .with_context(|| format!("removing wrapper {}", wrapper.display()))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
