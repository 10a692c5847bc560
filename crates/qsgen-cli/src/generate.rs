//! `qsgen generate`: source file in, query-set module out

use crate::config::QsConfig;
use anyhow::{Context, Result};
use qsgen_core::{GenerateOptions, ParsedPackage, generate_query_sets_for_structs};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub orm_path: Option<String>,
    pub no_header: bool,
    pub stdout: bool,
}

/// Generate command implementation
pub fn run(args: GenerateArgs) -> Result<()> {
    let config = QsConfig::load(args.config.as_deref())?;
    config.validate()?;

    let options = build_options(&args, &config)?;

    let package = ParsedPackage::parse_file(&args.input)
        .with_context(|| format!("Failed to parse {:?}", args.input))?;

    let Some(code) = generate_query_sets_for_structs(&package.types, &package.structs, &options)
        .with_context(|| format!("Failed to generate query sets for {:?}", args.input))?
    else {
        tracing::info!(input = ?args.input, "no struct marked with `gen:qs`, nothing written");
        return Ok(());
    };

    if args.stdout {
        print!("{code}");
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &config.output.suffix));

    if output == args.input {
        anyhow::bail!("Output path {output:?} would overwrite the input file");
    }

    if write_if_changed(&output, &code)? {
        println!("Generated {}", output.display());
    } else {
        tracing::info!(output = ?output, "output unchanged, not rewritten");
    }

    Ok(())
}

/// Merge command-line flags over the config file.
fn build_options(args: &GenerateArgs, config: &QsConfig) -> Result<GenerateOptions> {
    let mut options = GenerateOptions::new();

    if let Some(orm_path) = args
        .orm_path
        .as_ref()
        .or(config.generator.orm_path.as_ref())
    {
        options = options.with_orm_path(orm_path.as_str());
    }

    let header = !args.no_header && config.generator.header.unwrap_or(true);
    options = options.with_header(header);

    if let Some(path) = args
        .template
        .as_ref()
        .or(config.generator.custom_template.as_ref())
    {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {path:?}"))?;
        options = options.with_custom_template(source);
    }

    Ok(options)
}

/// `models.rs` becomes `models_queryset.rs` next to it.
fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{stem}{suffix}"))
}

/// Write `content` unless the file already holds exactly that.
///
/// Returns whether the file was written.
fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {parent:?}"))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {path:?}"))?;

    Ok(true)
}
