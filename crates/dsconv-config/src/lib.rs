#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Datastore config conversion between repo schema versions 5 and 6.
//!
//! Version 5 configs describe the datastore with flat fields (`Type`,
//! `NoSync`, `Path`, `Params`). Version 6 replaces them with a nested
//! `Spec` describing a mount of an instrumented flatfs block store and an
//! instrumented leveldb store. Only that one layout exists in version 5, so
//! a downgrade is refused for any other spec.
//!
//! # Usage
//!
//! ```rust
//! use dsconv_config::{Direction, convert_str};
//!
//! let v5 = r#"{"Datastore": {"NoSync": false, "Type": "leveldb"}}"#;
//! let v6 = convert_str(Direction::Upgrade, v5).unwrap();
//! assert!(v6.contains("\"Spec\""));
//!
//! let back = convert_str(Direction::Downgrade, &v6).unwrap();
//! assert!(back.contains("\"NoSync\": false"));
//! ```
//!
//! # Design
//!
//! Documents are handled as raw [`serde_json::Value`] trees. Field names in
//! the `Datastore` subtree and the document root are matched
//! case-insensitively through [`KeyIndex`], and every nested shape check
//! goes through the fallible accessors in [`value`] so malformed input is
//! reported as a [`ConfigError`], never a panic.

/// Conversion direction.
pub mod direction;
/// Whole-document conversion.
pub mod document;
/// Configuration error types.
pub mod error;
/// Case-insensitive key lookup.
pub mod keys;
/// In-place datastore subtree transforms.
pub mod migrate;
/// The canonical version 6 datastore spec.
pub mod spec;
/// Checked narrowing of JSON values.
pub mod value;

// Re-export primary types at the crate root.
pub use direction::{Direction, FLAT_SCHEMA_VERSION, SPEC_SCHEMA_VERSION};
pub use document::{MAX_CONFIG_SIZE, convert, convert_str, convert_value};
pub use error::{ConfigError, ConfigResult};
pub use keys::KeyIndex;
pub use migrate::{downgrade, upgrade};
pub use spec::datastore_spec;
