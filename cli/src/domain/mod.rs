//! Domain layer — pure pipeline logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifact;
pub mod config;
pub mod error;
pub mod launch;
pub mod properties;
pub mod sandbox;

/// Identity token printed by a passing detect phase.
pub const COMPONENT_ID: &str = "cx-iast-agent";

/// Pattern a binding's name, label, or tags must match to activate the agent.
pub const ACTIVATION_PATTERN: &str = "checkmarx";

#[allow(unused_imports)]
pub use artifact::{ArtifactSource, CatalogEntry, compilation_download_url, resolve_source};
#[allow(unused_imports)]
pub use config::{AcquireSource, AgentConfig};
#[allow(unused_imports)]
pub use error::{BindingError, ConfigError, ReleaseError, StageError};
#[allow(unused_imports)]
pub use launch::{LaunchFlag, launch_flags};
#[allow(unused_imports)]
pub use properties::override_properties;
#[allow(unused_imports)]
pub use sandbox::Sandbox;
