//! Request payload validation helpers.
//!
//! The settings update body is validated field-by-field rather than through
//! serde derive so a single response can name every offending field with the
//! type it received. Unknown fields are ignored to keep older clients working
//! after the payload grows.

use serde_json::{json, Value};

use crate::domain::{AccessibilityFlags, Error, FlagName};

/// Human-readable JSON type name for error details.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field_error_entry(field: FlagName, received: &'static str) -> Value {
    json!({
        "field": field.as_str(),
        "expected": "boolean",
        "received": received,
    })
}

/// Validate a settings update body into a complete flag set.
///
/// Every flag field must be present and a JSON boolean. All violations are
/// collected into a single `invalid_request` error whose details list one
/// entry per offending field.
///
/// # Errors
///
/// Returns an error when the body is not a JSON object or any flag field is
/// missing or non-boolean.
pub fn validate_flags_payload(payload: &Value) -> Result<AccessibilityFlags, Error> {
    let Some(body) = payload.as_object() else {
        return Err(Error::invalid_request("request body must be a JSON object")
            .with_details(json!({ "received": json_type_name(payload) })));
    };

    let mut flags = AccessibilityFlags::default();
    let mut errors = Vec::new();

    for flag in FlagName::ALL {
        match body.get(flag.as_str()) {
            Some(Value::Bool(value)) => flags.set(flag, *value),
            Some(other) => errors.push(field_error_entry(flag, json_type_name(other))),
            None => errors.push(field_error_entry(flag, "missing")),
        }
    }

    if errors.is_empty() {
        Ok(flags)
    } else {
        Err(
            Error::invalid_request("settings fields must all be present booleans")
                .with_details(json!({ "errors": errors })),
        )
    }
}
