//! Infrastructure-level errors (template loading)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Format;

/// Errors raised while reading bracket templates.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("no template for size {size}: {path}")]
    TemplateNotFound { size: usize, path: PathBuf },

    #[error("no built-in {format} template for size {size}")]
    UnsupportedSize { format: Format, size: usize },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid template: {context}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
