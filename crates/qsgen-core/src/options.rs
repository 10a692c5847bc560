//! Generation options

use crate::error::{QsError, QsResult};
use serde::{Deserialize, Serialize};

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Module path of the ORM facade the generated code imports `Db` and
    /// `DbResult` from.
    #[serde(default = "default_orm_path")]
    pub orm_path: String,

    /// Source of an extra template rendered after the built-in one.
    #[serde(default)]
    pub custom_template: Option<String>,

    /// Emit the "generated, do not edit" header.
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_orm_path() -> String {
    "crate::orm".to_string()
}

fn default_header() -> bool {
    true
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            orm_path: default_orm_path(),
            custom_template: None,
            header: default_header(),
        }
    }
}

impl GenerateOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ORM facade module path
    pub fn with_orm_path(mut self, orm_path: impl Into<String>) -> Self {
        self.orm_path = orm_path.into();
        self
    }

    /// Set the custom template source
    pub fn with_custom_template(mut self, source: impl Into<String>) -> Self {
        self.custom_template = Some(source.into());
        self
    }

    /// Toggle the generated-file header
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn orm_path(&self) -> &str {
        &self.orm_path
    }

    pub fn custom_template(&self) -> Option<&str> {
        self.custom_template.as_deref()
    }

    /// Check that the ORM path is a usable Rust path.
    pub fn validate(&self) -> QsResult<()> {
        let path = self.orm_path.trim();
        if path.is_empty() {
            return Err(QsError::Config("orm_path must not be empty".to_string()));
        }
        if syn::parse_str::<syn::Path>(path).is_err() {
            return Err(QsError::Config(format!(
                "orm_path `{path}` is not a valid Rust path"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "options/options_tests.rs"]
mod options_tests;
