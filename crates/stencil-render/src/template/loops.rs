//! Loop block expansion.

use serde_json::Value;
use stencil_syntax::{parse, LoopBlock, Node, SyntaxError};
use tracing::trace;

use super::interpolate::push_value;
use crate::context::{Context, Scope};
use crate::path::resolve;

/// Expands every `{% for item in array %}...{% endfor %}` block in `text`.
///
/// `array` is looked up as a bare top-level key of `context`. Each element is
/// bound to `item` in turn and the block body is interpolated with that
/// binding; the results are concatenated in array order. A block whose array
/// is missing or is not an array expands to nothing.
///
/// Placeholders outside loop blocks are left in place for
/// [`interpolate`](crate::interpolate).
///
/// ```rust
/// use stencil_render::{expand_loops, Context};
/// use serde_json::json;
///
/// let ctx = Context::try_from(json!({"items": [1, 2, 3]})).unwrap();
/// let out = expand_loops("{% for x in items %}[{{ x }}]{% endfor %}", &ctx).unwrap();
/// assert_eq!(out, "[1][2][3]");
/// ```
///
/// # Errors
///
/// Returns [`SyntaxError::NestedLoop`] if a loop body contains another loop.
pub fn expand_loops(text: &str, context: &Context) -> Result<String, SyntaxError> {
    let nodes = parse(text)?;
    let mut output = String::with_capacity(text.len());

    for node in &nodes {
        match node {
            Node::Loop(block) => expand_block(block, context, &mut output),
            other => output.push_str(other.source()),
        }
    }

    Ok(output)
}

/// Appends the expansion of one loop block to `output`.
pub(crate) fn expand_block(block: &LoopBlock<'_>, context: &Context, output: &mut String) {
    let Some(Value::Array(items)) = context.get(block.array) else {
        trace!(array = block.array, "loop source missing or not an array");
        return;
    };

    for item in items {
        let scope = Scope::new(context).bind(block.item, item);
        interpolate_nodes(&block.body, scope, output);
    }
}

/// Interpolates already-parsed nodes. Loop and include nodes are copied as text.
pub(crate) fn interpolate_nodes(nodes: &[Node<'_>], scope: Scope<'_>, output: &mut String) {
    for node in nodes {
        match node {
            Node::Variable { path, .. } => push_value(output, resolve(scope, path)),
            other => output.push_str(other.source()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(value: Value) -> Context {
        Context::try_from(value).unwrap()
    }

    #[test]
    fn test_expands_in_order() {
        let data = ctx(json!({"items": [1, 2, 3]}));
        let out = expand_loops("{% for x in items %}[{{ x }}]{% endfor %}", &data).unwrap();
        assert_eq!(out, "[1][2][3]");
    }

    #[test]
    fn test_missing_array_is_empty() {
        let data = Context::new();
        let out = expand_loops("{% for x in missing %}Y{% endfor %}", &data).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_empty_array_is_empty() {
        let data = ctx(json!({"items": []}));
        let out = expand_loops("a{% for x in items %}Y{% endfor %}b", &data).unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_non_array_is_empty() {
        let data = ctx(json!({"items": "abc", "obj": {"a": 1}, "nil": null}));
        for array in ["items", "obj", "nil"] {
            let text = format!("{{% for x in {} %}}Y{{% endfor %}}", array);
            assert_eq!(expand_loops(&text, &data).unwrap(), "", "array: {}", array);
        }
    }

    #[test]
    fn test_dotted_array_is_not_a_loop() {
        let data = ctx(json!({"user": {"items": [1]}}));
        let text = "{% for x in user.items %}Y{% endfor %}";
        assert_eq!(expand_loops(text, &data).unwrap(), text);
    }

    #[test]
    fn test_object_elements() {
        let data = ctx(json!({"posts": [{"title": "A"}, {"title": "B"}]}));
        let out = expand_loops(
            "{% for post in posts %}<li>{{ post.title }}</li>{% endfor %}",
            &data,
        )
        .unwrap();
        assert_eq!(out, "<li>A</li><li>B</li>");
    }

    #[test]
    fn test_parent_values_visible_in_body() {
        let data = ctx(json!({"sep": ",", "xs": ["a", "b"]}));
        let out = expand_loops("{% for x in xs %}{{ x }}{{ sep }}{% endfor %}", &data).unwrap();
        assert_eq!(out, "a,b,");
    }

    #[test]
    fn test_loop_variable_shadows_parent_only_inside_body() {
        let data = ctx(json!({"x": "outer", "xs": [1, 2]}));
        let out = expand_loops("{% for x in xs %}{{ x }}{% endfor %}{{ x }}", &data).unwrap();
        // The trailing placeholder is outside the loop and left for interpolation
        assert_eq!(out, "12{{ x }}");
    }

    #[test]
    fn test_parent_context_unchanged() {
        let data = ctx(json!({"x": "outer", "xs": [1, 2, 3]}));
        let before = data.clone();
        expand_loops("{% for x in xs %}{{ x }}{% endfor %}", &data).unwrap();
        assert_eq!(data, before);
        assert_eq!(data.get("x"), Some(&json!("outer")));
    }

    #[test]
    fn test_sibling_loops_resolve_independently() {
        let data = ctx(json!({"a": [1, 2], "b": ["x"]}));
        let out = expand_loops(
            "{% for i in a %}{{ i }}{% endfor %}|{% for j in b %}{{ j }}{{ i }}{% endfor %}",
            &data,
        )
        .unwrap();
        assert_eq!(out, "12|x");
    }

    #[test]
    fn test_multiline_body() {
        let data = ctx(json!({"rows": ["r1", "r2"]}));
        let out = expand_loops("{% for r in rows %}\n  <tr>{{ r }}</tr>{% endfor %}\n", &data)
            .unwrap();
        assert_eq!(out, "\n  <tr>r1</tr>\n  <tr>r2</tr>\n");
    }

    #[test]
    fn test_nested_loop_is_error() {
        let data = ctx(json!({"a": [[1]]}));
        let err = expand_loops(
            "{% for x in a %}{% for y in x %}{{ y }}{% endfor %}{% endfor %}",
            &data,
        )
        .unwrap_err();
        assert!(matches!(err, SyntaxError::NestedLoop { .. }));
    }

    #[test]
    fn test_unrecognized_markup_in_body_kept() {
        let data = ctx(json!({"xs": [1]}));
        let out = expand_loops("{% for x in xs %}{{ x | plus: 1 }}{% endfor %}", &data).unwrap();
        assert_eq!(out, "{{ x | plus: 1 }}");
    }
}
