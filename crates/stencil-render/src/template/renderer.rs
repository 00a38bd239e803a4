//! The page rendering pipeline.

use stencil_syntax::{parse, Node};
use tracing::{debug, debug_span};

use super::include::resolve_includes;
use super::interpolate::push_value;
use super::loops::expand_block;
use crate::context::Context;
use crate::error::RenderError;
use crate::path::resolve;
use crate::source::{DataSource, TemplateSource};

/// Renders pages from a template source and a data source.
///
/// Every call to [`render_page`](Self::render_page) re-reads its template and
/// data; nothing is cached between pages.
///
/// # Example
///
/// ```rust
/// use stencil_render::{Context, MemorySource, PageRenderer};
/// use serde_json::json;
///
/// let templates = MemorySource::new()
///     .with_template("index.liquid", r#"{% include "nav.liquid" %}{% for p in pages %}<{{ p }}>{% endfor %}"#)
///     .with_template("nav.liquid", "[{{ site }}]");
/// let data = MemorySource::new().with_data(
///     "index.json",
///     Context::try_from(json!({"site": "Docs", "pages": ["a", "b"]})).unwrap(),
/// );
///
/// let renderer = PageRenderer::new(templates, data);
/// assert_eq!(renderer.render_page("index.liquid", "index.json").unwrap(), "[Docs]<a><b>");
/// ```
#[derive(Debug, Clone)]
pub struct PageRenderer<T, D> {
    templates: T,
    data: D,
}

impl<T, D> PageRenderer<T, D>
where
    T: TemplateSource,
    D: DataSource,
{
    pub fn new(templates: T, data: D) -> Self {
        Self { templates, data }
    }

    pub fn templates(&self) -> &T {
        &self.templates
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Renders one page.
    ///
    /// 1. Load the template text
    /// 2. Load the page data (empty if there is none)
    /// 3. Splice in included partials
    /// 4. Expand loop blocks
    /// 5. Substitute placeholders
    ///
    /// # Errors
    ///
    /// - [`RenderError::TemplateNotFound`] if the template or a partial is missing
    /// - [`RenderError::DataLoad`] if the data file is not a JSON object
    /// - [`RenderError::Syntax`] if the template nests loop blocks
    /// - [`RenderError::OutsideRoot`] if a name is absolute or uses `..`
    pub fn render_page(&self, template_name: &str, data_name: &str) -> Result<String, RenderError> {
        let _span = debug_span!("render_page", template = template_name, data = data_name).entered();

        let template = self.templates.load_text(template_name)?;
        let context = self.data.load_data(data_name)?;
        debug!(keys = context.len(), "loaded page data");

        self.render_with(&template, &context)
    }

    /// Runs steps 3 to 5 of [`render_page`](Self::render_page) on inline text.
    pub fn render_with(&self, template: &str, context: &Context) -> Result<String, RenderError> {
        render_str(template, context, &self.templates)
    }
}

/// Renders template text against `context`, loading partials from `partials`.
///
/// ```rust
/// use stencil_render::{render_str, Context, MemorySource};
/// use serde_json::json;
///
/// let ctx = Context::try_from(json!({"x": [1, 2, 3]})).unwrap();
/// let out = render_str("{% for i in x %}[{{ i }}]{% endfor %}", &ctx, &MemorySource::new()).unwrap();
/// assert_eq!(out, "[1][2][3]");
/// ```
pub fn render_str<S>(template: &str, context: &Context, partials: &S) -> Result<String, RenderError>
where
    S: TemplateSource + ?Sized,
{
    let with_includes = resolve_includes(template, partials)?;
    expand(&with_includes, context)
}

/// Expands loops and placeholders over one parse of `text`.
///
/// Produces the same output as [`expand_loops`](crate::expand_loops) followed
/// by [`interpolate`](crate::interpolate), except that values substituted
/// inside loop bodies are not scanned a second time.
fn expand(text: &str, context: &Context) -> Result<String, RenderError> {
    let nodes = parse(text)?;
    let mut output = String::with_capacity(text.len());

    for node in &nodes {
        match node {
            Node::Loop(block) => expand_block(block, context, &mut output),
            Node::Variable { path, .. } => push_value(&mut output, resolve(context, path)),
            other => output.push_str(other.source()),
        }
    }

    Ok(output)
}
