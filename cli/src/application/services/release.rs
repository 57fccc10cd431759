//! Release phase — synthesize the launch configuration for the staged agent.
//!
//! Imports only from `crate::domain`, `crate::application::ports`, and
//! `cxpack_common`. All I/O is routed through injected port traits.

use anyhow::{Context, Result};
use cxpack_common::ActivationFilter;

use crate::application::ports::{BuildLog, LaunchOptionSink, ServiceRegistry, StagingFs};
use crate::application::services::detect::{Detection, detect_agent};
use crate::domain::artifact::SERVER_CREDENTIAL_KEY;
use crate::domain::error::{BindingError, ReleaseError};
use crate::domain::launch::{LaunchFlag, launch_flags};
use crate::domain::properties::override_properties;
use crate::domain::sandbox::Sandbox;

// ── Public types ──────────────────────────────────────────────────────────────

/// Per-invocation inputs of the release phase.
pub struct ReleaseOptions<'a> {
    pub filter: &'a ActivationFilter,
    pub sandbox: &'a Sandbox,
    /// Application display name, for the `cxAppTag` property.
    pub app_name: &'a str,
}

/// Outcome of the release phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Flags contributed and properties appended.
    Configured { flags: usize },
    /// No applicable binding; the launch command is left alone.
    Skipped,
}

// ── Release service ───────────────────────────────────────────────────────────

/// Run the release phase.
///
/// Preconditions are checked before anything is written: the binding must
/// carry a string `iast_server` credential and the staged archive must have
/// provided the override properties file. Only then is the flag sequence
/// computed — once, as pure data — and handed to the sink in order, followed
/// by the properties append.
///
/// # Errors
///
/// Returns an error when the credential is missing, the properties file was
/// never staged, or a sink or filesystem write fails.
pub fn release_agent(
    registry: &impl ServiceRegistry,
    sink: &impl LaunchOptionSink,
    fs: &impl StagingFs,
    log: &impl BuildLog,
    opts: &ReleaseOptions<'_>,
) -> Result<ReleaseOutcome> {
    let Detection::Applicable { binding } = detect_agent(registry, opts.filter, log) else {
        log.debug("release: agent not applicable, nothing to configure");
        return Ok(ReleaseOutcome::Skipped);
    };

    let server =
        binding
            .credential_str(SERVER_CREDENTIAL_KEY)
            .ok_or(BindingError::MissingCredential {
                key: SERVER_CREDENTIAL_KEY,
            })?;
    log.debug(&format!("agent will report to {server}"));

    let overrides = opts.sandbox.overrides_path();
    if !fs.exists(&overrides) {
        return Err(ReleaseError::OverridesMissing {
            path: overrides.display().to_string(),
        }
        .into());
    }

    let flags = launch_flags(opts.app_name, opts.sandbox);
    contribute(sink, &flags).context("contributing launch flags")?;

    fs.append(&overrides, &override_properties(server, &binding.credentials))
        .context("appending agent override properties")?;

    log.success(&format!("IAST agent configured for '{}'", opts.app_name));
    Ok(ReleaseOutcome::Configured { flags: flags.len() })
}

// ── Flag contribution ─────────────────────────────────────────────────────────

fn contribute(sink: &impl LaunchOptionSink, flags: &[LaunchFlag]) -> Result<()> {
    for flag in flags {
        match flag {
            LaunchFlag::SystemProperty { key, value } => sink.add_system_property(key, value)?,
            LaunchFlag::Preformatted(raw) => sink.add_preformatted(raw)?,
            LaunchFlag::JavaAgent(path) => sink.add_agent(path)?,
        }
    }
    Ok(())
}
