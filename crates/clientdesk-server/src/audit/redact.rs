//! Snapshot redaction
//!
//! Top-level keys naming credentials are stripped from audit snapshots before
//! they are persisted. Matching is exact and case-sensitive, and nested
//! objects are left untouched.

use serde_json::Value as JsonValue;

/// Keys removed from every snapshot
pub const SENSITIVE_FIELDS: &[&str] = &["password", "token", "secret"];

/// Remove [`SENSITIVE_FIELDS`] from the top level of a JSON object.
///
/// Non-object values are returned unchanged.
pub fn redact_snapshot(mut state: JsonValue) -> JsonValue {
    if let Some(object) = state.as_object_mut() {
        for field in SENSITIVE_FIELDS {
            object.remove(*field);
        }
    }
    state
}
