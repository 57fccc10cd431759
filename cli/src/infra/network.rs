//! Network availability policy for operator-provided endpoints.

use anyhow::Result;

use crate::application::ports::NetworkGate;

/// Production gate: run the operation as-is.
///
/// Endpoints come from operator configuration or service bindings, and the
/// platform retries failed builds wholesale, so the pipeline does no
/// reachability probing of its own — download errors speak for themselves.
pub struct AssumeAvailable;

impl NetworkGate for AssumeAvailable {
    fn with_endpoint<T>(&self, _endpoint: &str, op: impl FnOnce() -> Result<T>) -> Result<T> {
        op()
    }
}
