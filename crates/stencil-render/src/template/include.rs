//! Partial inclusion.

use stencil_syntax::{TokenKind, Tokenizer};
use tracing::debug;

use crate::error::RenderError;
use crate::source::TemplateSource;

/// Replaces every `{% include "name" %}` in `text` with the raw content of the
/// named partial.
///
/// Partials are spliced in unrendered, so their placeholders and loops are
/// expanded later against the including page's context. Inclusion is a single
/// pass: include tags inside a partial are not followed and remain as text.
///
/// ```rust
/// use stencil_render::{resolve_includes, MemorySource};
///
/// let partials = MemorySource::new().with_template("nav.liquid", "<nav>{{ title }}</nav>");
/// let out = resolve_includes(r#"{% include "nav.liquid" %}<main/>"#, &partials).unwrap();
/// assert_eq!(out, "<nav>{{ title }}</nav><main/>");
/// ```
///
/// # Errors
///
/// Returns [`RenderError::TemplateNotFound`] if a partial does not exist, or
/// [`RenderError::Io`] if it cannot be read.
pub fn resolve_includes<S>(text: &str, source: &S) -> Result<String, RenderError>
where
    S: TemplateSource + ?Sized,
{
    let mut output = String::with_capacity(text.len());

    for token in Tokenizer::new(text) {
        match token.kind {
            TokenKind::Include { name } => {
                debug!(partial = name, "including partial");
                let partial = source.load_text(name)?;
                output.push_str(&partial);
            }
            _ => output.push_str(token.source),
        }
    }

    Ok(output)
}
