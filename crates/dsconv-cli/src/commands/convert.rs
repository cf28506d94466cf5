//! The conversion command: wire input and output to the converter.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use dsconv_config::{ConfigError, Direction, convert};
use tracing::debug;

fn io_err(target: impl Into<String>) -> impl FnOnce(io::Error) -> ConfigError {
    move |source| ConfigError::Io {
        target: target.into(),
        source,
    }
}

/// Convert the config read from `input` (stdin if `None`) and write it to
/// `output` (stdout if `None`).
///
/// An output file is only created once the conversion has succeeded, so a
/// failed run leaves no partial file behind. Every error carries its cause
/// in its own message.
pub(crate) fn run(direction: Direction, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    debug!(
        direction = %direction,
        input = %input.map_or_else(|| "<stdin>".into(), |p| p.display().to_string()),
        output = %output.map_or_else(|| "<stdout>".into(), |p| p.display().to_string()),
        "starting conversion"
    );

    let mut converted = Vec::new();
    if let Some(path) = input {
        let file = File::open(path).map_err(io_err(path.display().to_string()))?;
        convert(direction, file, &mut converted)?;
    } else {
        convert(direction, io::stdin().lock(), &mut converted)?;
    }

    if let Some(path) = output {
        std::fs::write(path, &converted).map_err(io_err(path.display().to_string()))?;
    } else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&converted)
            .and_then(|()| stdout.flush())
            .map_err(io_err("<stdout>"))?;
    }
    Ok(())
}
