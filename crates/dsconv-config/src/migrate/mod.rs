//! In-place conversion of the `Datastore` subtree between schema versions.
//!
//! Both directions operate on the raw [`serde_json::Map`] of the subtree
//! rather than on deserialized structs, so unrelated sibling fields pass
//! through untouched and field names can be matched case-insensitively.

mod downgrade;
mod upgrade;

pub use downgrade::downgrade;
pub use upgrade::upgrade;

/// Display path of the datastore subtree in error messages.
pub(crate) const DATASTORE_PATH: &str = "Datastore";
