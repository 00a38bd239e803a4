//! Placeholder substitution.

use serde_json::Value;
use stencil_syntax::{TokenKind, Tokenizer};

use crate::context::{format_value, Scope};
use crate::path::resolve;

/// Replaces every `{{ path }}` placeholder in `text` with its resolved value.
///
/// Values are formatted with [`format_value`](crate::format_value). The
/// substituted text is inserted literally and never scanned again, so data
/// containing `{{ ... }}` cannot trigger further expansion. Loop tags, include
/// tags, and unrecognized markup are copied through unchanged.
///
/// ```rust
/// use stencil_render::{interpolate, Context};
/// use serde_json::json;
///
/// let ctx = Context::try_from(json!({"name": "Ada"})).unwrap();
/// assert_eq!(interpolate("Hello {{ name }}!", &ctx), "Hello Ada!");
/// ```
pub fn interpolate<'a>(text: &str, scope: impl Into<Scope<'a>>) -> String {
    let scope = scope.into();
    let mut output = String::with_capacity(text.len());

    for token in Tokenizer::new(text) {
        match token.kind {
            TokenKind::Variable { path } => push_value(&mut output, resolve(scope, path)),
            _ => output.push_str(token.source),
        }
    }

    output
}

/// Appends a formatted value to `output`.
pub(crate) fn push_value(output: &mut String, value: &Value) {
    output.push_str(&format_value(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use serde_json::json;

    fn ctx(value: Value) -> Context {
        Context::try_from(value).unwrap()
    }

    #[test]
    fn test_simple_substitution() {
        let data = ctx(json!({"name": "Ada"}));
        assert_eq!(interpolate("Hello {{ name }}!", &data), "Hello Ada!");
    }

    #[test]
    fn test_whitespace_variants() {
        let data = ctx(json!({"a": 1}));
        assert_eq!(interpolate("{{a}} {{ a }} {{   a\t}}", &data), "1 1 1");
    }

    #[test]
    fn test_multiple_placeholders() {
        let data = ctx(json!({"first": "Grace", "last": "Hopper"}));
        assert_eq!(interpolate("{{ first }} {{ last }}", &data), "Grace Hopper");
    }

    #[test]
    fn test_nested_path() {
        let data = ctx(json!({"user": {"city": "Paris"}}));
        assert_eq!(interpolate("City: {{ user.city }}", &data), "City: Paris");
    }

    #[test]
    fn test_missing_nested_key_is_empty() {
        let data = ctx(json!({"user": {}}));
        assert_eq!(interpolate("{{ user.city }}", &data), "");
    }

    #[test]
    fn test_scalar_formatting() {
        let data = ctx(json!({"n": 0, "f": 1.25, "yes": true, "no": false, "nil": null}));
        assert_eq!(
            interpolate("{{ n }}|{{ f }}|{{ yes }}|{{ no }}|{{ nil }}", &data),
            "0|1.25|true|false|"
        );
    }

    #[test]
    fn test_compound_value_renders_json() {
        let data = ctx(json!({"tags": ["a", "b"]}));
        assert_eq!(interpolate("{{ tags }}", &data), r#"["a","b"]"#);
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let data = ctx(json!({"evil": "{{ secret }}", "secret": "leaked"}));
        assert_eq!(interpolate("{{ evil }}", &data), "{{ secret }}");
    }

    #[test]
    fn test_unrecognized_markup_passes_through() {
        let data = ctx(json!({"name": "Ada"}));
        let text = "{{ name | upcase }} {% if name %}{% endif %} {{ name }}";
        assert_eq!(
            interpolate(text, &data),
            "{{ name | upcase }} {% if name %}{% endif %} Ada"
        );
    }

    #[test]
    fn test_directives_left_for_other_stages() {
        let data = ctx(json!({"x": 1}));
        let text = r#"{% for i in xs %}{% endfor %}{% include "p" %}"#;
        assert_eq!(interpolate(text, &data), text);
    }

    #[test]
    fn test_context_not_modified() {
        let data = ctx(json!({"name": "Ada"}));
        let before = data.clone();
        let _ = interpolate("{{ name }}", &data);
        assert_eq!(data, before);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::context::Context;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn text_without_placeholders_unchanged(text in "[^{}]{0,80}") {
            let data = Context::try_from(json!({"a": 1})).unwrap();
            prop_assert_eq!(interpolate(&text, &data), text);
        }

        #[test]
        fn string_values_inserted_verbatim(value in "[a-zA-Z0-9 {}%]{0,30}") {
            let data = Context::try_from(json!({"v": value.clone()})).unwrap();
            prop_assert_eq!(interpolate("<{{ v }}>", &data), format!("<{}>", value));
        }
    }
}
