//! Where templates and data come from.
//!
//! The engine never touches the filesystem directly. It asks a
//! [`TemplateSource`] for template and partial text and a [`DataSource`] for
//! page data:
//!
//! | Trait | Missing resource |
//! |-------|------------------|
//! | [`TemplateSource::load_text`] | [`LoadError::NotFound`] |
//! | [`DataSource::load_data`] | empty [`Context`] |
//!
//! Two implementations are provided:
//!
//! - [`DirSource`]: resolves names relative to an explicit root directory
//! - [`MemorySource`]: named in-memory templates and data
//!
//! # Example
//!
//! ```rust
//! use stencil_render::{DataSource, MemorySource, TemplateSource};
//!
//! let source = MemorySource::new().with_template("index.liquid", "Hi");
//! assert_eq!(source.load_text("index.liquid").unwrap(), "Hi");
//! assert!(source.load_text("other.liquid").is_err());
//! assert!(source.load_data("index.json").unwrap().is_empty());
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::context::Context;
use crate::error::LoadError;

/// Provides template and partial text by name.
pub trait TemplateSource {
    /// Returns the text stored under `name`.
    ///
    /// Fails with [`LoadError::NotFound`] if there is no such template.
    fn load_text(&self, name: &str) -> Result<String, LoadError>;
}

/// Provides page data by name.
pub trait DataSource {
    /// Returns the data stored under `name`, or an empty context if there is
    /// none.
    fn load_data(&self, name: &str) -> Result<Context, LoadError>;
}

impl<T: TemplateSource + ?Sized> TemplateSource for &T {
    fn load_text(&self, name: &str) -> Result<String, LoadError> {
        (**self).load_text(name)
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn load_data(&self, name: &str) -> Result<Context, LoadError> {
        (**self).load_data(name)
    }
}

/// Reads resources from files under a root directory.
///
/// Names are joined onto the root, so `"partials/nav.liquid"` reads
/// `<root>/partials/nav.liquid`. Absolute names and names containing `..`
/// are rejected with [`LoadError::OutsideRoot`]. Data files are parsed as
/// JSON and must hold an object at the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path a name resolves to, or `None` if it would leave the root.
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            .then(|| self.root.join(relative))
    }

    /// Reads a file, mapping a missing file to `Ok(None)`.
    fn read(&self, name: &str) -> Result<Option<String>, LoadError> {
        let path = self.path_of(name).ok_or_else(|| LoadError::OutsideRoot {
            name: name.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}

impl TemplateSource for DirSource {
    fn load_text(&self, name: &str) -> Result<String, LoadError> {
        self.read(name)?.ok_or_else(|| LoadError::NotFound {
            name: name.to_string(),
        })
    }
}

impl DataSource for DirSource {
    fn load_data(&self, name: &str) -> Result<Context, LoadError> {
        match self.read(name)? {
            Some(content) => {
                serde_json::from_str(&content).map_err(|source| LoadError::Malformed {
                    name: name.to_string(),
                    source,
                })
            }
            None => Ok(Context::new()),
        }
    }
}

/// Holds templates and data in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    templates: HashMap<String, String>,
    data: HashMap<String, Context>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, replacing any previous one with the same name.
    pub fn add_template(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.templates.insert(name.into(), content.into());
    }

    /// Adds page data, replacing any previous data with the same name.
    pub fn add_data(&mut self, name: impl Into<String>, data: Context) {
        self.data.insert(name.into(), data);
    }

    pub fn with_template(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.add_template(name, content);
        self
    }

    pub fn with_data(mut self, name: impl Into<String>, data: Context) -> Self {
        self.add_data(name, data);
        self
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl TemplateSource for MemorySource {
    fn load_text(&self, name: &str) -> Result<String, LoadError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
            })
    }
}

impl DataSource for MemorySource {
    fn load_data(&self, name: &str) -> Result<Context, LoadError> {
        Ok(self.data.get(name).cloned().unwrap_or_default())
    }
}
