//! Error types for query-set generation

use thiserror::Error;

/// Result type alias for generator operations
pub type QsResult<T> = Result<T, QsError>;

/// Error type for generator operations
///
/// Selection misses and unsupported fields are not errors; the only failure
/// of the generation pipeline itself is [`QsError::Render`]. The remaining
/// variants belong to the front end and the surrounding tooling.
#[derive(Error, Debug)]
pub enum QsError {
    /// A template failed to compile or execute
    #[error("can't generate structs query sets: template `{template}`: {source}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// Rust source could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] syn::Error),

    /// Filesystem error while reading input
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid generator configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl QsError {
    /// Returns a stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u8 {
        match self {
            QsError::Render { .. } => 2,
            QsError::Parse(_) => 3,
            QsError::Io(_) => 4,
            QsError::Config(_) => 5,
        }
    }

    pub(crate) fn render(template: &str, source: minijinja::Error) -> Self {
        QsError::Render {
            template: template.to_string(),
            source,
        }
    }
}
