//! Template expansion.
//!
//! A page is rendered in a fixed order:
//!
//! | Stage | Function | Input |
//! |-------|----------|-------|
//! | Includes | [`resolve_includes`] | template text, partial source |
//! | Loops | [`expand_loops`] | text with partials spliced in, page context |
//! | Placeholders | [`interpolate`] | text with loops expanded, page context |
//!
//! Includes run first so that placeholders and loops inside partials are
//! expanded against the including page's data. Each stage takes text and
//! returns new text; nothing is edited in place.
//!
//! [`PageRenderer`] ties the stages to a [`TemplateSource`](crate::TemplateSource)
//! and a [`DataSource`](crate::DataSource).
//!
//! ## Missing Things
//!
//! ```text
//! {{ user.phone }}            user has no phone      -> ""
//! {% for x in tags %}         tags absent / not list -> ""
//! {% include "nav.liquid" %}  nav.liquid absent      -> RenderError::TemplateNotFound
//! ```

mod include;
mod interpolate;
mod loops;
mod renderer;

pub use include::resolve_includes;
pub use interpolate::interpolate;
pub use loops::expand_loops;
pub use renderer::{render_str, PageRenderer};
