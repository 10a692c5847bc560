//! `qsgen inspect`: print what would be generated, as JSON

use anyhow::{Context, Result};
use qsgen_core::{ParsedPackage, QuerySetConfig, generate_query_set_configs};
use std::path::Path;

/// Inspect command implementation
pub fn run(input: &Path) -> Result<()> {
    let configs = configs_for_file(input)?;

    let json = serde_json::to_string_pretty(&configs).context("Failed to serialize configs")?;
    println!("{json}");

    Ok(())
}

fn configs_for_file(input: &Path) -> Result<Vec<QuerySetConfig>> {
    let package =
        ParsedPackage::parse_file(input).with_context(|| format!("Failed to parse {input:?}"))?;

    let configs = generate_query_set_configs(&package.types, &package.structs);
    tracing::info!(input = ?input, query_sets = configs.len(), "inspected source file");

    Ok(configs)
}
