//! `cxpack release` — contribute launch flags and override properties.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Result, ensure};

use crate::app::{AppContext, app_root};
use crate::application::services::detect::{Detection, detect_agent};
use crate::application::services::release::{ReleaseOptions, release_agent};
use crate::domain::sandbox::Sandbox;
use crate::infra::fs::LocalFs;
use crate::infra::launch::JavaOptsFile;
use crate::infra::vcap::application_name;

/// Wire the production adapters into the release service.
pub fn run(app: &AppContext, build_dir: &Path) -> Result<ExitCode> {
    ensure!(
        build_dir.is_dir(),
        "build directory {} does not exist",
        build_dir.display()
    );
    app.output
        .debug(&format!("release phase in {}", build_dir.display()));

    let log = app.build_log();

    // Applicability is settled before the application name is demanded, so
    // an unbound application releases cleanly without VCAP_APPLICATION.
    if matches!(
        detect_agent(&app.registry, &app.filter, &log),
        Detection::NotApplicable(_)
    ) {
        app.output
            .info("no matching IAST service binding; nothing to configure");
        return Ok(ExitCode::SUCCESS);
    }

    let app_name = application_name()?;
    let sandbox = Sandbox::for_build(build_dir, &app_root());
    let sink = JavaOptsFile::for_build(build_dir);

    release_agent(
        &app.registry,
        &sink,
        &LocalFs,
        &log,
        &ReleaseOptions {
            filter: &app.filter,
            sandbox: &sandbox,
            app_name: &app_name,
        },
    )?;
    Ok(ExitCode::SUCCESS)
}
