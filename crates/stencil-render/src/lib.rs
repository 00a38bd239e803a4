//! # Stencil Render - Template Expansion for Static Pages
//!
//! `stencil-render` turns a template plus a JSON data file into a finished
//! page. It understands exactly three constructs:
//!
//! - `{{ path.to.value }}` - variable interpolation
//! - `{% for item in items %}...{% endfor %}` - single-level iteration
//! - `{% include "partial.liquid" %}` - static inclusion
//!
//! Anything else in the template, including other `{% %}` tags and
//! `{{ x | filter }}` expressions, is copied to the output unchanged.
//!
//! ## Core Concepts
//!
//! - [`Context`]: the JSON object a page is rendered with
//! - [`Scope`]: a context plus the current loop binding
//! - [`resolve`]: dotted path lookup that never fails
//! - [`TemplateSource`] / [`DataSource`]: where templates and data come from
//! - [`PageRenderer`]: the full pipeline for one page
//!
//! ## Quick Start
//!
//! ```rust
//! use stencil_render::{render_str, Context, MemorySource};
//! use serde_json::json;
//!
//! let data = Context::try_from(json!({
//!     "title": "Changelog",
//!     "releases": [{"version": "0.2.0"}, {"version": "0.1.0"}]
//! })).unwrap();
//!
//! let template = "# {{ title }}\n{% for r in releases %}- {{ r.version }}\n{% endfor %}";
//! let output = render_str(template, &data, &MemorySource::new()).unwrap();
//!
//! assert_eq!(output, "# Changelog\n- 0.2.0\n- 0.1.0\n");
//! ```
//!
//! ## Rendering Files
//!
//! ```rust,ignore
//! use stencil_render::{DirSource, PageRenderer};
//!
//! let renderer = PageRenderer::new(DirSource::new("site/templates"), DirSource::new("site/data"));
//! let html = renderer.render_page("index.liquid", "index.json")?;
//! ```
//!
//! ## Missing Data vs Missing Templates
//!
//! Absent data is tolerated: unknown placeholders render as nothing and loops
//! over absent arrays produce no output. An absent template or partial is a
//! hard [`RenderError::TemplateNotFound`].

pub mod context;
mod error;
pub mod path;
pub mod source;
pub mod template;

// Error types
pub use error::{LoadError, RenderError};

// Data model
pub use context::{format_value, Context, Scope};
pub use path::{lookup, resolve};

// Sources
pub use source::{DataSource, DirSource, MemorySource, TemplateSource};

// Pipeline
pub use template::{expand_loops, interpolate, render_str, resolve_includes, PageRenderer};

// Syntax types that appear in the public API
pub use stencil_syntax::{Position, SyntaxError};
