//! Checked narrowing of [`serde_json::Value`] nodes.
//!
//! Every accessor takes the dotted `path` of the node it inspects so that a
//! shape mismatch anywhere in a nested document surfaces as one descriptive
//! [`ConfigError`] instead of a panic.

use serde_json::{Map, Value};

use crate::error::{ConfigError, ConfigResult};

/// Name the JSON kind of a value, for error messages.
#[must_use]
pub fn kind(val: &Value) -> &'static str {
    match val {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(path: &str, expected: &'static str, val: &Value) -> ConfigError {
    ConfigError::UnexpectedShape {
        path: path.to_owned(),
        expected,
        found: kind(val),
    }
}

/// Narrow to an object.
///
/// # Errors
///
/// Returns [`ConfigError::UnexpectedShape`] if `val` is not an object.
pub fn as_object<'a>(val: &'a Value, path: &str) -> ConfigResult<&'a Map<String, Value>> {
    val.as_object().ok_or_else(|| unexpected(path, "object", val))
}

/// Narrow to a mutable object.
///
/// # Errors
///
/// Returns [`ConfigError::UnexpectedShape`] if `val` is not an object.
pub fn as_object_mut<'a>(
    val: &'a mut Value,
    path: &str,
) -> ConfigResult<&'a mut Map<String, Value>> {
    let found = kind(val);
    val.as_object_mut()
        .ok_or_else(|| ConfigError::UnexpectedShape {
            path: path.to_owned(),
            expected: "object",
            found,
        })
}

/// Narrow to an array.
///
/// # Errors
///
/// Returns [`ConfigError::UnexpectedShape`] if `val` is not an array.
pub fn as_array<'a>(val: &'a Value, path: &str) -> ConfigResult<&'a Vec<Value>> {
    val.as_array().ok_or_else(|| unexpected(path, "array", val))
}

/// Narrow to a string.
///
/// # Errors
///
/// Returns [`ConfigError::UnexpectedShape`] if `val` is not a string.
pub fn as_str<'a>(val: &'a Value, path: &str) -> ConfigResult<&'a str> {
    val.as_str().ok_or_else(|| unexpected(path, "string", val))
}

/// Narrow to a bool.
///
/// # Errors
///
/// Returns [`ConfigError::UnexpectedShape`] if `val` is not a bool.
pub fn as_bool(val: &Value, path: &str) -> ConfigResult<bool> {
    val.as_bool().ok_or_else(|| unexpected(path, "bool", val))
}

/// Look up `key` in `map`, failing if it is absent.
///
/// `path` is the location of `map` itself; the error reports `path.key`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] if `key` is not present.
pub fn require<'a>(map: &'a Map<String, Value>, key: &str, path: &str) -> ConfigResult<&'a Value> {
    map.get(key).ok_or_else(|| ConfigError::MissingField {
        path: join(path, key),
    })
}

/// Append a field name to a dotted path.
#[must_use]
pub fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(kind(&json!(null)), "null");
        assert_eq!(kind(&json!(true)), "bool");
        assert_eq!(kind(&json!(1.5)), "number");
        assert_eq!(kind(&json!("x")), "string");
        assert_eq!(kind(&json!([])), "array");
        assert_eq!(kind(&json!({})), "object");
    }

    #[test]
    fn test_as_bool_rejects_string() {
        let err = as_bool(&json!("yes"), "Datastore.NoSync").unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'Datastore.NoSync' is string, expected bool"
        );
    }

    #[test]
    fn test_as_object_mut_allows_edit() {
        let mut val = json!({"a": 1});
        as_object_mut(&mut val, "root")
            .unwrap()
            .insert("b".to_owned(), json!(2));
        assert_eq!(val, json!({"a": 1, "b": 2}));

        let mut not_obj = json!([1]);
        assert!(matches!(
            as_object_mut(&mut not_obj, "root"),
            Err(ConfigError::UnexpectedShape { found: "array", .. })
        ));
    }

    #[test]
    fn test_require_reports_full_path() {
        let val = json!({"mounts": []});
        let map = as_object(&val, "Datastore.Spec").unwrap();
        assert!(require(map, "mounts", "Datastore.Spec").is_ok());

        let err = require(map, "type", "Datastore.Spec").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField { ref path } if path == "Datastore.Spec.type"
        ));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "Datastore"), "Datastore");
        assert_eq!(join("Datastore", "Spec"), "Datastore.Spec");
    }
}
