//! `cxpack detect` — decide applicability for the orchestrator.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Result, ensure};

use crate::app::AppContext;
use crate::application::services::detect::{Detection, detect_agent};
use crate::cli::DETECT_FAIL_CODE;
use crate::domain::COMPONENT_ID;

/// Run detection and translate the outcome into the phase protocol:
/// the component token on stdout and exit 0 when applicable, exit
/// [`DETECT_FAIL_CODE`] otherwise.
pub fn run(app: &AppContext, build_dir: &Path) -> Result<ExitCode> {
    ensure!(
        build_dir.is_dir(),
        "build directory {} does not exist",
        build_dir.display()
    );
    app.output
        .debug(&format!("detect phase in {}", build_dir.display()));

    match detect_agent(&app.registry, &app.filter, &app.build_log()) {
        Detection::Applicable { .. } => {
            println!("{COMPONENT_ID}");
            Ok(ExitCode::SUCCESS)
        }
        Detection::NotApplicable(_) => Ok(ExitCode::from(DETECT_FAIL_CODE)),
    }
}
