//! The `stencil` command line.
//!
//! Parsing and running are separate so the commands can be driven in-process:
//!
//! ```rust,ignore
//! use clap::Parser;
//! use stencil::cli::Cli;
//!
//! let cli = Cli::try_parse_from(["stencil", "--root", "site", "build"])?;
//! let mut out = Vec::new();
//! let status = cli.run(&mut out)?;
//! ```
//!
//! Logging setup stays in the binary; `run` only writes the command output.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use console::style;

use crate::build::{build_site, render_page, BuildReport, PageJob};
use crate::config::SiteConfig;
use crate::output::write_output;

/// Render a directory of templates and JSON data into static pages.
#[derive(Debug, Parser)]
#[command(name = "stencil", version, about)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to stencil.yaml in the site root, if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Site root directory
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render every page in the template directory
    Build(BuildArgs),

    /// Render a single template
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Template directory
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Data directory
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Template name, relative to the template directory
    template: String,

    /// Data file name, relative to the data directory
    #[arg(long, value_name = "FILE")]
    data: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

/// How a command finished, when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// The build ran but at least one page failed.
    PagesFailed,
}

impl RunStatus {
    pub fn is_success(self) -> bool {
        self == RunStatus::Success
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::PagesFailed => ExitCode::FAILURE,
        }
    }
}

impl Cli {
    /// Runs the parsed command, writing its output to `out`.
    ///
    /// Errors are reserved for failures that stop the command: an unreadable
    /// config, an unlistable template directory, a single page that will not
    /// render. Failed pages in a build are reported through [`RunStatus`].
    pub fn run<W: Write>(self, out: &mut W) -> Result<RunStatus> {
        let config = SiteConfig::load(self.root.as_deref(), self.config.as_deref())?;
        tracing::debug!(?config, "loaded site config");

        match self.command {
            Command::Build(args) => run_build(config, args, out),
            Command::Render(args) => run_render(config, args, out),
        }
    }
}

fn run_build<W: Write>(mut config: SiteConfig, args: BuildArgs, out: &mut W) -> Result<RunStatus> {
    if let Some(dir) = args.templates {
        config.template_dir = dir;
    }
    if let Some(dir) = args.data {
        config.data_dir = dir;
    }
    if let Some(dir) = args.out {
        config.output_dir = dir;
    }

    let report = build_site(&config)?;
    write_report(&report, out)?;

    Ok(if report.is_success() {
        RunStatus::Success
    } else {
        RunStatus::PagesFailed
    })
}

fn write_report<W: Write>(report: &BuildReport, out: &mut W) -> std::io::Result<()> {
    for page in &report.rendered {
        writeln!(
            out,
            "{} {} -> {}",
            style("rendered").green().bold(),
            page.job.template,
            page.path.display()
        )?;
    }
    for job in &report.skipped {
        writeln!(
            out,
            "{} {} (no {})",
            style("skipped").yellow().bold(),
            job.template,
            job.data
        )?;
    }
    for page in &report.failed {
        writeln!(
            out,
            "{} {}: {}",
            style("failed").red().bold(),
            page.job.template,
            page.error
        )?;
    }

    let summary = format!(
        "{} rendered, {} skipped, {} failed",
        report.rendered.len(),
        report.skipped.len(),
        report.failed.len()
    );
    if report.is_success() {
        writeln!(out, "{}", style(summary).bold())
    } else {
        writeln!(out, "{}", style(summary).red().bold())
    }
}

fn run_render<W: Write>(config: SiteConfig, args: RenderArgs, out: &mut W) -> Result<RunStatus> {
    let mut job = PageJob::for_template(&config, &args.template);
    if let Some(data) = args.data {
        job.data = data;
    }

    let output = render_page(&config, &job)
        .with_context(|| format!("failed to render {}", job.template))?;

    match args.out {
        Some(path) => {
            let bytes = write_output(&path, &output)?;
            eprintln!("Wrote {} bytes to {}", bytes, path.display());
        }
        None => write!(out, "{}", output)?,
    }

    Ok(RunStatus::Success)
}
