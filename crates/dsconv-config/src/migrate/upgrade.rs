use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::keys::KeyIndex;
use crate::spec::datastore_spec;

/// Values of the version 5 `Type` field that map onto the canonical spec.
const SUPPORTED_TYPES: [&str; 3] = ["default", "leveldb", ""];

/// Fields dropped by the upgrade. `Path` and `Params` were never consulted
/// by any version 5 datastore, so their values are discarded unchecked.
const DEPRECATED_FIELDS: [&str; 4] = ["nosync", "type", "path", "params"];

/// Convert a version 5 `Datastore` subtree to version 6 in place.
///
/// `NoSync` (default `false`) and `Type` (default `""`) are validated and
/// removed together with `Path` and `Params`, then `Spec` is installed with
/// `sync = !NoSync`.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedValue`] if `NoSync` is not a bool or
/// `Type` is not one of `"default"`, `"leveldb"` or `""`. The subtree is left
/// unmodified on error.
pub fn upgrade(ds: &mut Map<String, Value>) -> ConfigResult<()> {
    let keys = KeyIndex::build(ds);

    let no_sync = match keys.value(ds, "nosync") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(no_sync)) => *no_sync,
        Some(other) => {
            return Err(ConfigError::UnsupportedValue {
                field: "Datastore.NoSync",
                value: other.to_string(),
            });
        },
    };

    match keys.value(ds, "type") {
        None | Some(Value::Null) => {},
        Some(Value::String(ds_type)) if SUPPORTED_TYPES.contains(&ds_type.as_str()) => {
            debug!(ds_type = %ds_type, "accepted datastore type");
        },
        Some(Value::String(ds_type)) => {
            return Err(ConfigError::UnsupportedValue {
                field: "Datastore.Type",
                value: ds_type.clone(),
            });
        },
        Some(other) => {
            return Err(ConfigError::UnsupportedValue {
                field: "Datastore.Type",
                value: other.to_string(),
            });
        },
    }

    for field in DEPRECATED_FIELDS {
        if keys.remove(ds, field).is_some() {
            debug!(field, "removed deprecated datastore field");
        }
    }

    let sync = !no_sync;
    ds.insert("Spec".to_owned(), datastore_spec(sync));
    debug!(sync, "installed datastore spec");
    Ok(())
}
