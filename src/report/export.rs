//! JSON export of query results.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write any serializable result to a pretty-printed JSON file.
pub fn export_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(())
}
