//! Dotted path resolution.
//!
//! Paths like `user.address.city` are resolved by walking the scope one
//! segment at a time. Objects are indexed by key, arrays by position
//! (`items.0.name`). The walk stops as soon as a segment cannot be followed,
//! and the result is then the empty string: missing data renders as nothing.

use serde_json::Value;

use crate::context::Scope;

/// What a path that cannot be followed resolves to.
static EMPTY: Value = Value::String(String::new());

/// Resolves `path` against `scope`, returning `None` where the walk stops.
///
/// The walk stops when a key is absent, when an array index is out of range
/// or not a number, when a segment is applied to a scalar, or when the final
/// value is null.
pub fn lookup<'a>(scope: impl Into<Scope<'a>>, path: &str) -> Option<&'a Value> {
    let scope = scope.into();
    let mut segments = path.split('.');

    let mut current = scope.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    (!current.is_null()).then_some(current)
}

/// Resolves `path` against `scope`.
///
/// Never fails: anything [`lookup`] cannot find resolves to an empty string.
///
/// ```rust
/// use stencil_render::{resolve, Context};
/// use serde_json::json;
///
/// let ctx = Context::try_from(json!({"user": {"address": {"city": "Paris"}}})).unwrap();
/// assert_eq!(resolve(&ctx, "user.address.city"), &json!("Paris"));
/// assert_eq!(resolve(&ctx, "user.phone.mobile"), &json!(""));
/// ```
pub fn resolve<'a>(scope: impl Into<Scope<'a>>, path: &str) -> &'a Value {
    lookup(scope, path).unwrap_or(&EMPTY)
}
