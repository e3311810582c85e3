//! JSON output for takeoff results.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Takeoff;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a takeoff to JSON.
pub fn to_json(takeoff: &Takeoff, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(takeoff),
        JsonFormat::Compact => serde_json::to_string(takeoff),
    };

    result.map_err(Error::from)
}

/// Serialize a takeoff and write it to `path`.
pub fn write_json<P: AsRef<Path>>(takeoff: &Takeoff, path: P, format: JsonFormat) -> Result<()> {
    let json = to_json(takeoff, format)?;
    fs::write(path, json)?;
    Ok(())
}
