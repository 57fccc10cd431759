//! Launch-flag synthesis — the JVM flags that activate the staged agent.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use crate::domain::sandbox::Sandbox;

// ── Constants ────────────────────────────────────────────────────────────────

/// System property carrying the application's display name.
pub const APP_TAG_PROPERTY: &str = "cxAppTag";

/// System property carrying the team assignment.
pub const TEAM_PROPERTY: &str = "cxTeam";

/// Fixed team every instrumented application reports under.
pub const TEAM_TAG: &str = "CxServer";

/// System property pointing the agent at its runtime home.
pub const AGENT_HOME_PROPERTY: &str = "iast.home";

/// The agent rewrites bytecode on the fly; the verifier must not run on it.
pub const SKIP_BYTECODE_VERIFY_FLAG: &str = "-Xverify:none";

// ── Launch flags ─────────────────────────────────────────────────────────────

/// One JVM flag contributed to the application's launch command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchFlag {
    /// A `-Dkey=value` system property.
    SystemProperty { key: String, value: String },
    /// A flag passed through verbatim.
    Preformatted(String),
    /// A `-javaagent:` attachment, with the runtime path of the jar.
    JavaAgent(String),
}

impl LaunchFlag {
    /// Render the flag as it appears on the JVM command line.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::SystemProperty { key, value } => format!("-D{key}={value}"),
            Self::Preformatted(flag) => flag.clone(),
            Self::JavaAgent(path) => format!("-javaagent:{path}"),
        }
    }
}

/// The complete flag sequence for an application named `app_name`.
///
/// Order is part of the contract: identity properties first, then the
/// verifier opt-out, then the agent attachment. All paths are runtime mount
/// paths, never staging paths.
#[must_use]
pub fn launch_flags(app_name: &str, sandbox: &Sandbox) -> Vec<LaunchFlag> {
    vec![
        LaunchFlag::SystemProperty {
            key: APP_TAG_PROPERTY.to_string(),
            value: app_name.to_string(),
        },
        LaunchFlag::SystemProperty {
            key: TEAM_PROPERTY.to_string(),
            value: TEAM_TAG.to_string(),
        },
        LaunchFlag::SystemProperty {
            key: AGENT_HOME_PROPERTY.to_string(),
            value: sandbox.mount.clone(),
        },
        LaunchFlag::Preformatted(SKIP_BYTECODE_VERIFY_FLAG.to_string()),
        LaunchFlag::JavaAgent(sandbox.launcher_mount()),
    ]
}

// ── Unit tests ───────────────────────────────────────────────────────────────
