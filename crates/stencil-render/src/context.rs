//! Render contexts and loop scopes.
//!
//! A [`Context`] is the data a page is rendered with: a JSON object loaded
//! from the page's data file. It is built once per render and only read
//! afterwards.
//!
//! A [`Scope`] is what placeholders are resolved against. Outside loops it is
//! just the context. Inside a loop body it is the context plus one binding for
//! the loop variable:
//!
//! ```rust
//! use stencil_render::{Context, Scope};
//! use serde_json::json;
//!
//! let ctx = Context::try_from(json!({"title": "Posts", "post": "outer"})).unwrap();
//! let element = json!("first");
//!
//! let scope = Scope::new(&ctx).bind("post", &element);
//! assert_eq!(scope.get("post"), Some(&element));
//! assert_eq!(scope.get("title"), Some(&json!("Posts")));
//!
//! // The context itself never sees the binding
//! assert_eq!(ctx.get("post"), Some(&json!("outer")));
//! ```
//!
//! The binding is a borrowed overlay, so an iteration never copies or mutates
//! the parent context and one iteration's binding is gone before the next
//! begins.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Variables available to one page render.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Context(Map<String, Value>);

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the top-level value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts a top-level value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Context {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Only JSON objects convert; any other value is handed back.
impl TryFrom<Value> for Context {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// A context with at most one loop-variable binding layered on top.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    context: &'a Context,
    binding: Option<(&'a str, &'a Value)>,
}

impl<'a> Scope<'a> {
    /// Creates a scope that sees exactly the context.
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            binding: None,
        }
    }

    /// Returns a scope where `name` resolves to `value`.
    ///
    /// Loops do not nest, so a scope holds a single binding; binding again
    /// replaces it.
    pub fn bind(self, name: &'a str, value: &'a Value) -> Self {
        Self {
            context: self.context,
            binding: Some((name, value)),
        }
    }

    /// Looks up a top-level key, checking the loop binding first.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.binding {
            Some((name, value)) if name == key => Some(value),
            _ => self.context.get(key),
        }
    }

    /// The context underneath any binding.
    pub fn context(&self) -> &'a Context {
        self.context
    }
}

impl<'a> From<&'a Context> for Scope<'a> {
    fn from(context: &'a Context) -> Self {
        Scope::new(context)
    }
}

/// Formats a JSON value as placeholder output.
///
/// Strings render verbatim, numbers and booleans in their JSON form, null as
/// nothing. Arrays and objects render as compact JSON.
pub fn format_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Null => Cow::Borrowed(""),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}
