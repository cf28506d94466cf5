//! Dsconv Telemetry - Logging for the dsconv config converter.
//!
//! Logs always go to stderr: stdout carries the converted document.
//!
//! # Example
//!
//! ```rust,no_run
//! use dsconv_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), dsconv_telemetry::TelemetryError> {
//! let config = LogConfig::new("warn,dsconv_config=debug")
//!     .with_format(LogFormat::Compact)
//!     .without_ansi();
//!
//! setup_logging(&config)?;
//! tracing::info!("converting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_logging};
