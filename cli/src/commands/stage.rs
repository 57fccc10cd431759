//! `cxpack stage` — acquire the agent and populate the sandbox.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};

use crate::app::{AppContext, app_root};
use crate::application::services::stage::{StageOptions, StageOutcome, stage_agent};
use crate::domain::sandbox::Sandbox;
use crate::infra::archive::TarGzExtractor;
use crate::infra::config::YamlConfigSource;
use crate::infra::fetch::UreqFetcher;
use crate::infra::fs::LocalFs;
use crate::infra::network::AssumeAvailable;

/// Wire the production adapters into the stage service.
pub fn run(app: &AppContext, build_dir: &Path, cache_dir: &Path) -> Result<ExitCode> {
    ensure!(
        build_dir.is_dir(),
        "build directory {} does not exist",
        build_dir.display()
    );
    app.output
        .debug(&format!("stage phase in {}", build_dir.display()));

    let config = YamlConfigSource
        .load()
        .context("loading agent configuration")?;
    let sandbox = Sandbox::for_build(build_dir, &app_root());

    let outcome = stage_agent(
        &app.registry,
        &UreqFetcher::new(app.output.show_progress()),
        &TarGzExtractor,
        &AssumeAvailable,
        &LocalFs,
        &app.build_log(),
        &StageOptions {
            filter: &app.filter,
            config: &config,
            sandbox: &sandbox,
            cache_dir,
        },
    )?;

    if matches!(outcome, StageOutcome::Skipped) {
        app.output
            .info("no matching IAST service binding; nothing to stage");
    }
    Ok(ExitCode::SUCCESS)
}
