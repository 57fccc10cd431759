//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` and passed as
//! `&AppContext` to all command handlers. Adding a cross-cutting concern
//! (a new global flag, say) is one field change here — zero command
//! signatures change.

use anyhow::{Context, Result};
use cxpack_common::ActivationFilter;

use crate::domain::ACTIVATION_PATTERN;
use crate::domain::sandbox::DEFAULT_APP_ROOT;
use crate::infra::vcap::VcapServicesRegistry;
use crate::output::OutputContext;
use crate::output::reporter::TerminalBuildLog;

/// Environment override for the runtime droplet root, for platforms that
/// mount the droplet somewhere other than `/home/vcap/app`.
pub const APP_ROOT_ENV_VAR: &str = "CXPACK_APP_ROOT";

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Show phase-internal detail.
    pub verbose: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode, verbosity).
    pub output: OutputContext,
    /// Compiled activation filter for this component.
    pub filter: ActivationFilter,
    /// Service bindings visible to this build.
    pub registry: VcapServicesRegistry,
}

impl AppContext {
    /// Build the context from CLI flags and the platform environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `VCAP_SERVICES` is set but unparseable.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet, flags.verbose),
            filter: ActivationFilter::new(ACTIVATION_PATTERN)
                .context("compiling activation filter")?,
            registry: VcapServicesRegistry::from_env()?,
        })
    }

    /// Build log wired to this context's output settings.
    #[must_use]
    pub fn build_log(&self) -> TerminalBuildLog<'_> {
        TerminalBuildLog::new(&self.output)
    }
}

/// Runtime droplet root for launch-flag paths.
#[must_use]
pub fn app_root() -> String {
    std::env::var(APP_ROOT_ENV_VAR).unwrap_or_else(|_| DEFAULT_APP_ROOT.to_string())
}
