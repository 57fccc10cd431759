//! Platform environment adapters — `VCAP_SERVICES` and `VCAP_APPLICATION`.
//!
//! The platform injects both documents into every staging container. An
//! unset `VCAP_SERVICES` is an application with no bindings, not an error;
//! an unset `VCAP_APPLICATION` is fatal where the application name is
//! actually needed.

use anyhow::{Context, Result, anyhow};
use cxpack_common::{ActivationFilter, ServiceBinding, parse_vcap_services};
use serde::Deserialize;

use crate::application::ports::ServiceRegistry;

/// Environment variable holding the bound-services document.
pub const SERVICES_ENV_VAR: &str = "VCAP_SERVICES";

/// Environment variable holding the application metadata document.
pub const APPLICATION_ENV_VAR: &str = "VCAP_APPLICATION";

// ── Service registry ──────────────────────────────────────────────────────────

/// Registry view over the `VCAP_SERVICES` document.
#[derive(Debug)]
pub struct VcapServicesRegistry {
    bindings: Vec<ServiceBinding>,
}

impl VcapServicesRegistry {
    /// Read the registry from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `VCAP_SERVICES` is set but not parseable.
    pub fn from_env() -> Result<Self> {
        match std::env::var(SERVICES_ENV_VAR) {
            Ok(document) => Self::from_document(&document),
            Err(_) => Ok(Self {
                bindings: Vec::new(),
            }),
        }
    }

    /// Build the registry from a raw document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is not valid `VCAP_SERVICES` JSON.
    pub fn from_document(document: &str) -> Result<Self> {
        let bindings = parse_vcap_services(document)
            .with_context(|| format!("parsing {SERVICES_ENV_VAR}"))?;
        Ok(Self { bindings })
    }
}

impl ServiceRegistry for VcapServicesRegistry {
    fn bindings_matching(&self, filter: &ActivationFilter) -> Vec<ServiceBinding> {
        self.bindings
            .iter()
            .filter(|binding| filter.matches(binding))
            .cloned()
            .collect()
    }
}

// ── Application identity ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VcapApplication {
    application_name: String,
}

/// The application's display name, from the process environment.
///
/// # Errors
///
/// Returns an error when `VCAP_APPLICATION` is unset, unparseable, or has
/// no `application_name` field.
pub fn application_name() -> Result<String> {
    let raw = std::env::var(APPLICATION_ENV_VAR)
        .map_err(|_| anyhow!("{APPLICATION_ENV_VAR} is not set; cannot name the application"))?;
    application_name_from(&raw)
}

/// Parse the application name out of a raw `VCAP_APPLICATION` document.
///
/// # Errors
///
/// Returns an error when the document is unparseable or lacks the field.
pub fn application_name_from(document: &str) -> Result<String> {
    let app: VcapApplication =
        serde_json::from_str(document).with_context(|| format!("parsing {APPLICATION_ENV_VAR}"))?;
    Ok(app.application_name)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
