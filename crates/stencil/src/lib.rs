//! # Stencil - Static Page Builder
//!
//! Renders every page of a site directory with [`stencil_render`]: one
//! template plus one JSON data file per page, written to an output directory.
//!
//! ```rust,ignore
//! use stencil::{build_site, SiteConfig};
//!
//! let config = SiteConfig::load(Some("site".as_ref()), None)?;
//! let report = build_site(&config)?;
//! for page in &report.failed {
//!     eprintln!("{}: {}", page.job.template, page.error);
//! }
//! ```
//!
//! The `stencil` binary wraps this with the command line in [`cli`]; see
//! `stencil --help`.

pub mod build;
pub mod cli;
pub mod config;
mod error;
mod output;

pub use build::{
    build_site, discover_pages, render_page, BuildReport, FailedPage, PageJob, RenderedPage,
};
pub use config::{SiteConfig, CONFIG_FILE_NAME};
pub use error::{BuildError, ConfigError};
pub use output::write_output;

pub use stencil_render;
