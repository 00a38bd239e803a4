//! Batch rendering of every page in a site.
//!
//! A page is a template file at the top level of the template directory.
//! Subdirectories are never scanned, so partials can live in e.g.
//! `templates/partials/` without being rendered on their own.
//!
//! Each page is paired with a data file of the same base name:
//!
//! ```text
//! templates/index.liquid  +  data/index.json  ->  dist/index.html
//! templates/about.liquid  +  data/about.json  ->  dist/about.html
//! templates/draft.liquid     (no data file)   ->  skipped
//! ```
//!
//! One page failing does not stop the others. Failures are collected in the
//! [`BuildReport`].

use std::fs;
use std::path::PathBuf;

use stencil_render::{DirSource, PageRenderer};
use tracing::{error, info, info_span, warn};

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::output::write_output;

/// One page to render: template, data file and output file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJob {
    /// Template name, relative to the template directory.
    pub template: String,
    /// Data file name, relative to the data directory.
    pub data: String,
    /// Output file name, relative to the output directory.
    pub output: String,
}

impl PageJob {
    pub fn for_template(config: &SiteConfig, template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            data: config.data_name_for(&template),
            output: config.output_name_for(&template),
            template,
        }
    }
}

/// A page that was written.
#[derive(Debug)]
pub struct RenderedPage {
    pub job: PageJob,
    pub path: PathBuf,
    pub bytes: usize,
}

/// A page that could not be rendered or written.
#[derive(Debug)]
pub struct FailedPage {
    pub job: PageJob,
    pub error: BuildError,
}

/// Outcome of [`build_site`].
#[derive(Debug, Default)]
pub struct BuildReport {
    pub rendered: Vec<RenderedPage>,
    /// Pages with no data file.
    pub skipped: Vec<PageJob>,
    pub failed: Vec<FailedPage>,
}

impl BuildReport {
    /// True when no page failed. Skipped pages do not count as failures.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.rendered.len() + self.skipped.len() + self.failed.len()
    }
}

/// Lists the pages of a site, sorted by template name.
pub fn discover_pages(config: &SiteConfig) -> Result<Vec<PageJob>, BuildError> {
    let dir = config.template_root();
    let dir_err = |source| BuildError::TemplateDir {
        path: dir.clone(),
        source,
    };

    let mut templates = Vec::new();
    for entry in fs::read_dir(&dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        if !entry.file_type().map_err(dir_err)?.is_file() {
            continue;
        }
        // Non-UTF-8 names cannot be referenced from a template anyway
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if config.page_stem(&name).is_some() {
            templates.push(name);
        }
    }
    templates.sort();

    Ok(templates
        .into_iter()
        .map(|t| PageJob::for_template(config, t))
        .collect())
}

/// Renders every page of a site into the output directory.
///
/// Fails only when the template directory cannot be listed or the output
/// directory cannot be created. Per-page failures land in the report.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport, BuildError> {
    let jobs = discover_pages(config)?;

    let out_dir = config.output_root();
    fs::create_dir_all(&out_dir).map_err(|source| BuildError::OutputDir {
        path: out_dir.clone(),
        source,
    })?;

    let data_root = config.data_root();
    let renderer = PageRenderer::new(
        DirSource::new(config.template_root()),
        DirSource::new(&data_root),
    );

    let mut report = BuildReport::default();
    for job in jobs {
        let _span = info_span!("page", template = %job.template).entered();

        if !data_root.join(&job.data).is_file() {
            warn!(data = %job.data, "No data file found, skipping");
            report.skipped.push(job);
            continue;
        }

        let path = out_dir.join(&job.output);
        let result = renderer
            .render_page(&job.template, &job.data)
            .map_err(BuildError::from)
            .and_then(|html| write_output(&path, &html));

        match result {
            Ok(bytes) => {
                info!(output = %path.display(), bytes, "rendered successfully");
                report.rendered.push(RenderedPage { job, path, bytes });
            }
            Err(error) => {
                error!(%error, "page failed");
                report.failed.push(FailedPage { job, error });
            }
        }
    }

    Ok(report)
}

/// Renders a single page and returns the output text.
///
/// Unlike [`build_site`], a missing data file is not a skip: the page is
/// rendered with an empty context.
pub fn render_page(config: &SiteConfig, job: &PageJob) -> Result<String, BuildError> {
    let renderer = PageRenderer::new(
        DirSource::new(config.template_root()),
        DirSource::new(config.data_root()),
    );
    Ok(renderer.render_page(&job.template, &job.data)?)
}
