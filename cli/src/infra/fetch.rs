//! HTTP artifact fetcher built on `ureq`.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::ArtifactFetcher;

/// Blocking single-request fetcher.
///
/// Streams the response into `<dest>.partial` and renames it into place at
/// the end, so `dest` only ever holds a complete download. The partial file
/// is removed on failure; retry policy belongs to the caller.
pub struct UreqFetcher {
    show_progress: bool,
}

impl UreqFetcher {
    #[must_use]
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }
}

impl ArtifactFetcher for UreqFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let response = match ureq::get(url).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => anyhow::bail!("HTTP {code} from {url}"),
            Err(err) => anyhow::bail!("cannot reach {url}: {err}"),
        };

        let partial = partial_path(dest);
        let outcome = stream_response(response, &partial, dest, self.show_progress);
        if outcome.is_err() {
            std::fs::remove_file(&partial).ok();
        }
        outcome
    }
}

fn stream_response(
    response: ureq::Response,
    partial: &Path,
    dest: &Path,
    show_progress: bool,
) -> Result<()> {
    let total = response
        .header("Content-Length")
        .and_then(|v| v.parse::<u64>().ok());
    let pb = make_progress_bar(show_progress, total, dest);

    let mut file = std::fs::File::create(partial)
        .with_context(|| format!("creating {}", partial.display()))?;
    let mut reader = response.into_reader();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).context("download interrupted")?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).context("download interrupted")?;
        pb.inc(n as u64);
    }
    pb.finish_and_clear();
    drop(file);
    std::fs::rename(partial, dest).context("finalizing downloaded archive")?;
    Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

#[allow(clippy::expect_used)] // Templates are compile-time constants
fn make_progress_bar(show: bool, total: Option<u64>, dest: &Path) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let name = dest
        .file_name()
        .map_or_else(|| "archive".to_string(), |n| n.to_string_lossy().into_owned());
    match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  {msg}\n    {bar:40.cyan/dim} {percent}%  {bytes}/{total_bytes}")
                    .expect("valid template")
                    .progress_chars("━━─"),
            );
            pb.set_message(name);
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner:.cyan} {msg} {bytes}")
                    .expect("valid template"),
            );
            pb.set_message(name);
            pb
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
