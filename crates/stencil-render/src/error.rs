//! Error types for page rendering.
//!
//! Two error types live here:
//!
//! - [`LoadError`]: what a [`TemplateSource`](crate::TemplateSource) or
//!   [`DataSource`](crate::DataSource) reports.
//! - [`RenderError`]: what the rendering pipeline reports to its caller.
//!
//! Missing *data* is never an error: absent variables render as nothing and
//! loops over absent arrays render as nothing. Missing *templates* are always
//! an error.

use std::path::PathBuf;

use stencil_syntax::SyntaxError;
use thiserror::Error;

/// Error type for resource loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No resource exists under the requested name.
    #[error("resource not found: {name}")]
    NotFound { name: String },

    /// The name is absolute or climbs out of the source root with `..`.
    #[error("resource name leaves the source root: {name}")]
    OutsideRoot { name: String },

    /// The resource exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data resource is not a valid JSON object.
    #[error("malformed data in {name}: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template or included partial could not be located.
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// A data file exists but is not a JSON object.
    #[error("failed to load data {name}: {source}")]
    DataLoad {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A template, partial, or data name points outside its directory.
    #[error("name leaves the source root: {name}")]
    OutsideRoot { name: String },

    /// The template uses markup the engine refuses to guess at.
    #[error("template syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A template or data file could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<LoadError> for RenderError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound { name } => RenderError::TemplateNotFound { name },
            LoadError::OutsideRoot { name } => RenderError::OutsideRoot { name },
            LoadError::Io { path, source } => RenderError::Io { path, source },
            LoadError::Malformed { name, source } => RenderError::DataLoad { name, source },
        }
    }
}
