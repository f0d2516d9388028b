//! Assertions over the CLI's JSON output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert the number of rows on the rendered page.
pub fn assert_row_count(json: &Value, expected: usize) -> Result<()> {
    let rows = json["rows"]
        .as_array()
        .context("Expected 'rows' array in JSON")?;

    if rows.len() != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, rows.len());
    }

    Ok(())
}

/// Assert the row ids, in display order.
pub fn assert_row_ids(json: &Value, expected: &[&str]) -> Result<()> {
    let rows = json["rows"]
        .as_array()
        .context("Expected 'rows' array in JSON")?;

    let ids: Vec<&str> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row["id"]
                .as_str()
                .with_context(|| format!("Row {} missing id", i))
        })
        .collect::<Result<_>>()?;

    if ids != expected {
        anyhow::bail!("Expected rows {:?}, got {:?}", expected, ids);
    }

    Ok(())
}
