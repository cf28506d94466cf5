//! The canonical datastore `Spec` of the version 6 schema.
//!
//! Version 5 repos could only describe one datastore layout: a flatfs block
//! store under `/blocks` and a leveldb store at `/`, both instrumented. This
//! module builds that layout as a version 6 spec. The `sync` flag of the
//! flatfs store is the only variable part.

use serde_json::{Value, json};

/// Mountpoint of the flatfs block store.
pub const BLOCKS_MOUNTPOINT: &str = "/blocks";
/// Mountpoint of the leveldb root store.
pub const ROOT_MOUNTPOINT: &str = "/";
/// Metric prefix of the measure wrapper around the flatfs store.
pub const FLATFS_PREFIX: &str = "flatfs.datastore";
/// Metric prefix of the measure wrapper around the leveldb store.
pub const LEVELDB_PREFIX: &str = "leveldb.datastore";
/// Shard function of the flatfs store.
pub const SHARD_FUNC: &str = "/repo/flatfs/shard/v1/next-to-last/2";

/// Build the `/blocks` mount entry.
#[must_use]
pub fn blocks_mount(sync: bool) -> Value {
    json!({
        "mountpoint": BLOCKS_MOUNTPOINT,
        "type": "measure",
        "prefix": FLATFS_PREFIX,
        "child": {
            "type": "flatfs",
            "path": "blocks",
            "sync": sync,
            "shardFunc": SHARD_FUNC,
        },
    })
}

/// Build the `/` mount entry.
#[must_use]
pub fn root_mount() -> Value {
    json!({
        "mountpoint": ROOT_MOUNTPOINT,
        "type": "measure",
        "prefix": LEVELDB_PREFIX,
        "child": {
            "type": "levelds",
            "path": "datastore",
            "compression": "none",
        },
    })
}

/// Build the full spec with mounts in canonical `[/blocks, /]` order.
#[must_use]
pub fn datastore_spec(sync: bool) -> Value {
    json!({
        "type": "mount",
        "mounts": [blocks_mount(sync), root_mount()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_is_deterministic() {
        assert_eq!(datastore_spec(true), datastore_spec(true));
        assert_ne!(datastore_spec(true), datastore_spec(false));
    }

    #[test]
    fn test_sync_only_at_blocks_child() {
        let spec = datastore_spec(false);
        assert_eq!(spec["mounts"][0]["mountpoint"], BLOCKS_MOUNTPOINT);
        assert_eq!(spec["mounts"][0]["child"]["sync"], false);
        assert_eq!(spec["mounts"][1]["mountpoint"], ROOT_MOUNTPOINT);
        assert!(spec["mounts"][1]["child"].get("sync").is_none());
        assert!(spec.get("sync").is_none());
    }

    #[test]
    fn test_spec_serializes_with_sorted_keys() {
        let out = serde_json::to_string(&datastore_spec(true)).unwrap();
        assert!(out.starts_with(r#"{"mounts":[{"child":{"path":"blocks","shardFunc""#));
        assert!(out.ends_with(r#""type":"mount"}"#));
    }
}
