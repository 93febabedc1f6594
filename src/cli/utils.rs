use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::cli::OutputFormat;

/// Read a JSON document from disk.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "success": true,
            "message": message,
            "data": data,
        })),
        OutputFormat::Text => {
            println!("✓ {}", message);
            Ok(())
        }
    }
}
