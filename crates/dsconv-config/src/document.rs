//! Whole-document conversion.
//!
//! Reads a complete config, locates its `Datastore` subtree, converts it in
//! place and serializes the document back out. Nothing is written unless
//! the whole conversion succeeded.

use std::io::{Read, Write};

use serde_json::Value;
use tracing::{debug, info};

use crate::direction::Direction;
use crate::error::{ConfigError, ConfigResult};
use crate::keys::KeyIndex;
use crate::migrate::DATASTORE_PATH;
use crate::value::as_object_mut;

/// Maximum accepted config size (1 MB). Larger input is refused with
/// [`ConfigError::TooLarge`] even if it is a valid config.
pub const MAX_CONFIG_SIZE: u64 = 1_048_576;

/// Convert the `Datastore` subtree of a parsed document in place.
///
/// The subtree keeps whatever key casing it had in the input.
///
/// # Errors
///
/// Returns [`ConfigError::UnexpectedShape`] if the document or its
/// datastore is not an object, [`ConfigError::MissingField`] if there is no
/// datastore, or the transform's error.
pub fn convert_value(direction: Direction, doc: &mut Value) -> ConfigResult<()> {
    let root = as_object_mut(doc, "<document>")?;
    let key = KeyIndex::build(root)
        .get("datastore")
        .map(str::to_owned)
        .ok_or_else(|| ConfigError::MissingField {
            path: DATASTORE_PATH.to_owned(),
        })?;
    debug!(key = %key, "found datastore subtree");

    let ds = root
        .get_mut(&key)
        .ok_or_else(|| ConfigError::MissingField {
            path: DATASTORE_PATH.to_owned(),
        })?;
    direction.apply(as_object_mut(ds, DATASTORE_PATH)?)
}

/// Convert a JSON document held in a string.
///
/// The output is pretty-printed with two-space indentation and ends with a
/// newline.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] for malformed input, or any error
/// from [`convert_value`].
pub fn convert_str(direction: Direction, input: &str) -> ConfigResult<String> {
    let mut doc: Value =
        serde_json::from_str(input).map_err(|e| ConfigError::ParseError { source: e })?;
    convert_value(direction, &mut doc)?;

    let mut out = serde_json::to_string_pretty(&doc)
        .map_err(|e| ConfigError::SerializeError { source: e })?;
    out.push('\n');
    Ok(out)
}

/// Read a document from `input`, convert it and write it to `output`.
///
/// `output` is only written to after the conversion succeeded.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] on read or write failures,
/// [`ConfigError::TooLarge`] if the input exceeds [`MAX_CONFIG_SIZE`], or
/// any error from [`convert_str`].
pub fn convert<R: Read, W: Write>(
    direction: Direction,
    input: R,
    mut output: W,
) -> ConfigResult<()> {
    let content = read_bounded(input)?;
    let converted = convert_str(direction, &content)?;

    output
        .write_all(converted.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|e| ConfigError::Io {
            target: "<output>".to_owned(),
            source: e,
        })?;
    info!(
        direction = %direction,
        from = direction.from_version(),
        to = direction.to_version(),
        "converted datastore config"
    );
    Ok(())
}

/// Read all of `input`, refusing more than [`MAX_CONFIG_SIZE`] bytes.
fn read_bounded<R: Read>(input: R) -> ConfigResult<String> {
    let mut content = String::new();
    // One byte past the limit is enough to detect oversized input.
    input
        .take(MAX_CONFIG_SIZE.saturating_add(1))
        .read_to_string(&mut content)
        .map_err(|e| ConfigError::Io {
            target: "<input>".to_owned(),
            source: e,
        })?;

    let size = content.len() as u64;
    if size > MAX_CONFIG_SIZE {
        return Err(ConfigError::TooLarge {
            size,
            limit: MAX_CONFIG_SIZE,
        });
    }
    Ok(content)
}
