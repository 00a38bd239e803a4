//! Error types for site configuration and builds.

use std::path::PathBuf;

use stencil_render::RenderError;
use thiserror::Error;

/// Errors that can occur while loading a site configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that can occur while building a site or a single page.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The template directory could not be listed. Fatal to the whole build.
    #[error("cannot read template directory {}: {source}", path.display())]
    TemplateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created. Fatal to the whole build.
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rendered page could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page failed to render.
    #[error(transparent)]
    Render(#[from] RenderError),
}
