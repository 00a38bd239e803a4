//! Site layout configuration.
//!
//! A site is a root directory holding three subdirectories:
//!
//! ```text
//! site/
//! ├── stencil.yaml        (optional)
//! ├── templates/
//! │   ├── index.liquid
//! │   ├── about.liquid
//! │   └── partials/       (not rendered as pages)
//! ├── data/
//! │   ├── index.json
//! │   └── about.json
//! └── dist/               (created on build)
//! ```
//!
//! Every field can be overridden in `stencil.yaml`. Directories are relative
//! to the site root; extensions may be written with or without a leading dot:
//!
//! ```yaml
//! template_dir: pages
//! output_dir: public
//! output_ext: .htm
//! ```
//!
//! The root itself is never read from the process working directory behind
//! the caller's back: it is either passed in, or taken from the location of
//! the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Name of the config file looked up in a site root.
pub const CONFIG_FILE_NAME: &str = "stencil.yaml";

/// Where a site's templates, data, and output live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory the other paths are relative to.
    #[serde(skip)]
    pub root: PathBuf,
    pub template_dir: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_ext: String,
    pub data_ext: String,
    pub output_ext: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            template_dir: PathBuf::from("templates"),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("dist"),
            template_ext: "liquid".to_string(),
            data_ext: "json".to_string(),
            output_ext: "html".to_string(),
        }
    }
}

impl SiteConfig {
    /// Creates the default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Parses a YAML config. Missing fields keep their defaults.
    pub fn from_yaml_str(
        yaml: &str,
        root: impl Into<PathBuf>,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        // An empty file deserializes as null, not as an empty mapping
        let mut config: SiteConfig = if yaml.trim().is_empty() {
            SiteConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?
        };
        config.root = root.into();
        Ok(config.normalized())
    }

    /// Reads a config file. The site root is the directory containing it.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_yaml_str(&yaml, root, path)
    }

    /// Loads the configuration for a site.
    ///
    /// With an explicit `config_file`, that file is read and `root` (if given)
    /// overrides its location. Otherwise `<root>/stencil.yaml` is used when it
    /// exists, and the defaults when it does not.
    pub fn load(root: Option<&Path>, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(file) => Self::from_yaml_file(file)?,
            None => {
                let root = root.unwrap_or(Path::new("."));
                let candidate = root.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::from_yaml_file(&candidate)?
                } else {
                    Self::new(root)
                }
            }
        };

        if let Some(root) = root {
            config.root = root.to_path_buf();
        }

        Ok(config)
    }

    /// Strips leading dots from the extensions.
    fn normalized(mut self) -> Self {
        for ext in [
            &mut self.template_ext,
            &mut self.data_ext,
            &mut self.output_ext,
        ] {
            let trimmed = ext.trim_start_matches('.');
            if trimmed.len() != ext.len() {
                *ext = trimmed.to_string();
            }
        }
        self
    }

    pub fn template_root(&self) -> PathBuf {
        self.root.join(&self.template_dir)
    }

    pub fn data_root(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    /// Returns the base name of a template file, if it has the template extension.
    pub fn page_stem<'a>(&self, template: &'a str) -> Option<&'a str> {
        template
            .strip_suffix(self.template_ext.as_str())
            .and_then(|s| s.strip_suffix('.'))
            .filter(|s| !s.is_empty())
    }

    /// Data file name paired with a template.
    ///
    /// `index.liquid` pairs with `index.json`. A name without the template
    /// extension gets the data extension appended.
    pub fn data_name_for(&self, template: &str) -> String {
        let stem = self.page_stem(template).unwrap_or(template);
        format!("{}.{}", stem, self.data_ext)
    }

    /// Output file name produced for a template.
    pub fn output_name_for(&self, template: &str) -> String {
        let stem = self.page_stem(template).unwrap_or(template);
        format!("{}.{}", stem, self.output_ext)
    }
}
