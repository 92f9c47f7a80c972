//! Shared helpers for the integration tests.

use veris::Value;

/// Build a dynamic value from a JSON literal.
pub fn v(json: serde_json::Value) -> Value {
    veris::json::from_json(json)
}
