//! Detect phase — decide whether the agent applies to this application.
//!
//! Detection is read-only and deterministic: the same registry content
//! always yields the same answer. It inspects binding names, labels, and
//! tags only; credential shape is not checked until a later phase actually
//! needs a credential.

use cxpack_common::{ActivationFilter, ServiceBinding};

use crate::application::ports::{BuildLog, ServiceRegistry};

/// Outcome of the detect phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// Exactly one binding matched; later phases operate on it.
    Applicable { binding: ServiceBinding },
    /// The agent stays out of this build.
    NotApplicable(RejectReason),
}

/// Why detection declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No binding matched the filter.
    NoMatch,
    /// More than one binding matched; picking one arbitrarily would make
    /// staging depend on platform JSON ordering, so none is picked.
    Ambiguous(usize),
}

/// Run detection against the registry.
pub fn detect_agent(
    registry: &impl ServiceRegistry,
    filter: &ActivationFilter,
    log: &impl BuildLog,
) -> Detection {
    let mut candidates = registry.bindings_matching(filter);
    if candidates.len() > 1 {
        log.warn(&format!(
            "{} service bindings match '{}'; bind exactly one to activate the agent",
            candidates.len(),
            filter.as_str()
        ));
        return Detection::NotApplicable(RejectReason::Ambiguous(candidates.len()));
    }
    match candidates.pop() {
        Some(binding) => {
            log.debug(&format!("service binding '{}' activates the agent", binding.name));
            Detection::Applicable { binding }
        }
        None => {
            log.debug(&format!("no service binding matches '{}'", filter.as_str()));
            Detection::NotApplicable(RejectReason::NoMatch)
        }
    }
}
