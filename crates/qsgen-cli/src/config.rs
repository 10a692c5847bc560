//! qsgen.toml parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "qsgen.toml";

/// qsgen.toml structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QsConfig {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Module path of the ORM facade
    #[serde(default)]
    pub orm_path: Option<String>,

    /// Extra template, relative to the config file
    #[serde(default)]
    pub custom_template: Option<PathBuf>,

    /// Emit the generated-file header
    #[serde(default)]
    pub header: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Appended to the input file stem to name the output file
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_suffix() -> String {
    "_queryset.rs".to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

impl QsConfig {
    /// Load config from a file
    ///
    /// A relative `custom_template` is resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {path:?}"))?;

        let mut config = Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {path:?}"))?;

        if let (Some(template), Some(dir)) = (&config.generator.custom_template, path.parent()) {
            if template.is_relative() {
                config.generator.custom_template = Some(dir.join(template));
            }
        }

        Ok(config)
    }

    /// Parse config from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the explicit config file, or `qsgen.toml` in the working
    /// directory if it exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!(path = ?default, "using config from working directory");
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if let Some(orm_path) = &self.generator.orm_path {
            if orm_path.trim().is_empty() {
                anyhow::bail!("generator.orm_path cannot be empty");
            }
        }

        if !self.output.suffix.ends_with(".rs") {
            anyhow::bail!(
                "output.suffix should end with `.rs` (got `{}`)",
                self.output.suffix
            );
        }

        if self.output.suffix.contains(['/', '\\']) {
            anyhow::bail!("output.suffix cannot contain path separators");
        }

        Ok(())
    }
}
