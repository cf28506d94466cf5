use serde_json::{Map, Value};
use tracing::debug;

use super::DATASTORE_PATH;
use crate::error::{ConfigError, ConfigResult};
use crate::keys::KeyIndex;
use crate::spec::{BLOCKS_MOUNTPOINT, ROOT_MOUNTPOINT, datastore_spec};
use crate::value::{as_array, as_bool, as_object, as_str, join, require};

/// Convert a version 6 `Datastore` subtree to version 5 in place.
///
/// Only the canonical spec built by [`datastore_spec`] can be expressed in
/// version 5; its mounts may appear in either order. On success `Spec` is
/// replaced by `Type = "leveldb"`, `Params = null` and `NoSync = !sync`.
///
/// # Errors
///
/// Returns [`ConfigError::Incompatible`] wrapping the cause if the spec is
/// missing, malformed, names an unknown mountpoint, or differs from the
/// canonical spec in any field. The subtree is left unmodified on error.
pub fn downgrade(ds: &mut Map<String, Value>) -> ConfigResult<()> {
    let keys = KeyIndex::build(ds);
    let sync = canonical_sync(&keys, ds).map_err(ConfigError::incompatible)?;

    keys.remove(ds, "spec");
    ds.insert("Type".to_owned(), Value::from("leveldb"));
    ds.insert("Params".to_owned(), Value::Null);
    ds.insert("NoSync".to_owned(), Value::Bool(!sync));
    debug!(sync, "restored flat datastore fields");
    Ok(())
}

/// Check that `Spec` is the canonical spec and return its `sync` flag.
fn canonical_sync(keys: &KeyIndex, ds: &Map<String, Value>) -> ConfigResult<bool> {
    let spec_path = join(DATASTORE_PATH, "Spec");
    let spec_val = keys
        .value(ds, "spec")
        .ok_or_else(|| ConfigError::MissingField {
            path: spec_path.clone(),
        })?;
    let spec = as_object(spec_val, &spec_path)?;

    let mounts_path = join(&spec_path, "mounts");
    let mounts = as_array(require(spec, "mounts", &spec_path)?, &mounts_path)?;

    let mut blocks = None;
    let mut root = None;
    let mut sync = true;
    for (i, mount) in mounts.iter().enumerate() {
        let mount_path = format!("{mounts_path}[{i}]");
        let entry = as_object(mount, &mount_path)?;
        let mountpoint = as_str(
            require(entry, "mountpoint", &mount_path)?,
            &join(&mount_path, "mountpoint"),
        )?;

        let slot = match mountpoint {
            BLOCKS_MOUNTPOINT => {
                let child_path = join(&mount_path, "child");
                let child = as_object(require(entry, "child", &mount_path)?, &child_path)?;
                sync = as_bool(
                    require(child, "sync", &child_path)?,
                    &join(&child_path, "sync"),
                )?;
                &mut blocks
            },
            ROOT_MOUNTPOINT => &mut root,
            other => {
                return Err(ConfigError::UnknownMountpoint {
                    mountpoint: other.to_owned(),
                });
            },
        };
        if slot.replace(mount).is_some() {
            return Err(ConfigError::DuplicateMountpoint {
                mountpoint: mountpoint.to_owned(),
            });
        }
    }

    let (Some(blocks), Some(root)) = (blocks, root) else {
        return Err(ConfigError::UnsupportedSpec);
    };

    let mut normalized = spec.clone();
    normalized.insert(
        "mounts".to_owned(),
        Value::Array(vec![blocks.clone(), root.clone()]),
    );
    if Value::Object(normalized) != datastore_spec(sync) {
        return Err(ConfigError::UnsupportedSpec);
    }
    Ok(sync)
}
