//! Service-binding model as exposed through the `VCAP_SERVICES` document.
//!
//! The platform hands every application instance a JSON document mapping
//! service offerings to the bindings created against them. Only the fields
//! the staging pipeline inspects are modelled here; anything else in the
//! document is ignored on deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bound service instance, as it appears inside `VCAP_SERVICES`.
///
/// `credentials` keeps the platform's JSON shape verbatim: brokers are free
/// to put arbitrary structures there, and the pipeline forwards everything it
/// does not interpret itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Instance name chosen by the user at bind time.
    pub name: String,
    /// Offering label (`user-provided` for CUPS bindings).
    #[serde(default)]
    pub label: String,
    /// Broker- or user-supplied tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Service plan, absent for user-provided instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Connection credentials; `serde_json::Map` keeps keys in sorted order.
    #[serde(default)]
    pub credentials: Map<String, Value>,
}

impl ServiceBinding {
    /// Look up a credential that must be a JSON string.
    ///
    /// Returns `None` both when the key is absent and when its value is a
    /// non-string, so callers can treat "missing" and "unusable" the same way.
    #[must_use]
    pub fn credential_str(&self, key: &str) -> Option<&str> {
        self.credentials.get(key).and_then(Value::as_str)
    }
}

/// Parse a `VCAP_SERVICES` document into a flat list of bindings.
///
/// The document groups bindings by offering label; the grouping carries no
/// information the bindings themselves lack, so it is flattened away. The
/// `BTreeMap` keeps the result deterministic regardless of JSON key order.
pub fn parse_vcap_services(document: &str) -> Result<Vec<ServiceBinding>, serde_json::Error> {
    let offerings: BTreeMap<String, Vec<ServiceBinding>> = serde_json::from_str(document)?;
    Ok(offerings.into_values().flatten().collect())
}
