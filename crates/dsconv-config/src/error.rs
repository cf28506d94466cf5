use std::io;
use thiserror::Error;

/// Configuration conversion error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the input document or write the converted one.
    #[error("I/O error on {target}: {source}")]
    Io {
        /// What was being read or written (e.g. `<stdin>` or a file path).
        target: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The input document exceeds [`MAX_CONFIG_SIZE`](crate::MAX_CONFIG_SIZE).
    ///
    /// Older converters read input of any size; this cap is specific to
    /// `dsconv`, so a valid but oversized config is refused here.
    #[error("config is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge {
        /// Number of bytes read before giving up.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The input is not well-formed JSON.
    #[error("failed to parse config: {source}")]
    ParseError {
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The converted document could not be serialized.
    #[error("failed to serialize config: {source}")]
    SerializeError {
        /// Underlying JSON serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A required field is absent.
    #[error("missing field '{path}'")]
    MissingField {
        /// Dotted location of the missing field.
        path: String,
    },

    /// A field holds a value of the wrong kind.
    #[error("field '{path}' is {found}, expected {expected}")]
    UnexpectedShape {
        /// Dotted location of the offending field.
        path: String,
        /// Kind of value that was expected.
        expected: &'static str,
        /// Kind of value actually present.
        found: &'static str,
    },

    /// A deprecated field carries a value the conversion cannot represent.
    #[error("unsupported value for {field} field: {value}")]
    UnsupportedValue {
        /// Field name (e.g. `Datastore.Type`).
        field: &'static str,
        /// Offending value as it appeared in the input.
        value: String,
    },

    /// A mount entry names a mountpoint outside the known layout.
    #[error("unknown mountpoint '{mountpoint}'")]
    UnknownMountpoint {
        /// The unrecognized mountpoint.
        mountpoint: String,
    },

    /// A mountpoint appears more than once in the mounts list.
    #[error("duplicate mountpoint '{mountpoint}'")]
    DuplicateMountpoint {
        /// The repeated mountpoint.
        mountpoint: String,
    },

    /// The spec does not match the only layout the old schema can express.
    #[error("Datastore.Spec field not of a supported value, can't downgrade")]
    UnsupportedSpec,

    /// Any structural failure while downgrading, wrapping the cause.
    #[error("incompatible config detected, downgrade not possible: {source}")]
    Incompatible {
        /// What was wrong with the spec.
        #[source]
        source: Box<ConfigError>,
    },

    /// Unrecognized conversion direction name.
    #[error("unknown direction '{name}'; expected one of: 5-to-6, 6-to-5")]
    UnknownDirection {
        /// The name that was given.
        name: String,
    },
}

impl ConfigError {
    /// Wrap `self` as the cause of a failed downgrade.
    #[must_use]
    pub fn incompatible(self) -> Self {
        match self {
            already @ Self::Incompatible { .. } => already,
            other => Self::Incompatible {
                source: Box::new(other),
            },
        }
    }
}

/// Result type for configuration conversion.
pub type ConfigResult<T> = Result<T, ConfigError>;
