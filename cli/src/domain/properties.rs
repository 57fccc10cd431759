//! Override-properties rendering — the block appended to the agent's
//! `cx_agent.override.properties` at release time.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use serde_json::{Map, Value};

/// Property key naming the IAST server, read by the agent at startup.
pub const SERVER_PROPERTY_KEY: &str = "cxIastServer";

/// Render the properties block for a bound server and its credentials.
///
/// The server line comes first, then one `key=value` line per credential in
/// sorted key order (the order `serde_json::Map` iterates in). String values
/// are written bare; any other JSON value is written in its compact JSON
/// form so nothing the broker provided is silently dropped. Every line ends
/// with a newline, so repeated appends never glue lines together.
#[must_use]
pub fn override_properties(server: &str, credentials: &Map<String, Value>) -> String {
    let mut out = String::new();
    out.push_str(SERVER_PROPERTY_KEY);
    out.push('=');
    out.push_str(server);
    out.push('\n');
    for (key, value) in credentials {
        out.push_str(key);
        out.push('=');
        out.push_str(&property_value(value));
        out.push('\n');
    }
    out
}

fn property_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
