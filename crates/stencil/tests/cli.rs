//! Driving the command line in-process.

use std::fs;
use std::path::Path;

use clap::Parser;
use stencil::cli::{Cli, RunStatus};
use tempfile::TempDir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "templates/index.liquid", "Hello {{ name }}!");
    write(dir.path(), "data/index.json", r#"{"name": "Ada"}"#);
    dir
}

fn run(args: &[&str]) -> (anyhow::Result<RunStatus>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = cli.run(&mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_build_success() {
    let dir = site();
    let root = dir.path().to_str().unwrap();

    let (result, output) = run(&["stencil", "--root", root, "build"]);

    assert_eq!(result.unwrap(), RunStatus::Success);
    assert!(output.contains("index.liquid -> "));
    assert!(output.contains("1 rendered, 0 skipped, 0 failed"));
    assert_eq!(
        fs::read_to_string(dir.path().join("dist/index.html")).unwrap(),
        "Hello Ada!"
    );
}

#[test]
fn test_build_with_failed_page_exits_nonzero() {
    let dir = site();
    write(dir.path(), "templates/broken.liquid", r#"{% include "gone.liquid" %}"#);
    write(dir.path(), "data/broken.json", "{}");
    let root = dir.path().to_str().unwrap();

    let (result, output) = run(&["stencil", "--root", root, "build"]);
    let status = result.unwrap();

    assert_eq!(status, RunStatus::PagesFailed);
    assert!(!status.is_success());
    assert!(output.contains("broken.liquid: template not found: gone.liquid"));
    assert!(output.contains("1 rendered, 0 skipped, 1 failed"));
}

#[test]
fn test_build_directory_overrides() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "pages/a.liquid", "{{ v }}");
    write(dir.path(), "json/a.json", r#"{"v": 1}"#);
    let root = dir.path().to_str().unwrap();

    let (result, _) = run(&[
        "stencil", "--root", root, "build", "--templates", "pages", "--data", "json", "--out",
        "site",
    ]);

    assert!(result.unwrap().is_success());
    assert_eq!(fs::read_to_string(dir.path().join("site/a.html")).unwrap(), "1");
}

#[test]
fn test_build_without_templates_is_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_str().unwrap();

    let (result, _) = run(&["stencil", "--root", root, "build"]);
    assert!(result.is_err());
}

#[test]
fn test_render_to_output() {
    let dir = site();
    let root = dir.path().to_str().unwrap();

    let (result, output) = run(&["stencil", "--root", root, "render", "index.liquid"]);

    assert!(result.unwrap().is_success());
    assert_eq!(output, "Hello Ada!");
}

#[test]
fn test_render_with_data_override_to_file() {
    let dir = site();
    write(dir.path(), "data/other.json", r#"{"name": "Grace"}"#);
    let root = dir.path().to_str().unwrap();
    let target = dir.path().join("out.html");

    let (result, output) = run(&[
        "stencil",
        "--root",
        root,
        "render",
        "index.liquid",
        "--data",
        "other.json",
        "--out",
        target.to_str().unwrap(),
    ]);

    assert!(result.unwrap().is_success());
    assert!(output.is_empty());
    assert_eq!(fs::read_to_string(target).unwrap(), "Hello Grace!");
}

#[test]
fn test_render_missing_template_is_error() {
    let dir = site();
    let root = dir.path().to_str().unwrap();

    let (result, _) = run(&["stencil", "--root", root, "render", "nope.liquid"]);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("failed to render nope.liquid"));
}

#[test]
fn test_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "conf/site.yaml", "output_dir: public\n");
    write(dir.path(), "conf/templates/p.liquid", "ok");
    write(dir.path(), "conf/data/p.json", "{}");
    let config = dir.path().join("conf/site.yaml");

    let (result, _) = run(&["stencil", "--config", config.to_str().unwrap(), "build"]);

    assert!(result.unwrap().is_success());
    assert!(dir.path().join("conf/public/p.html").is_file());
}

#[test]
fn test_verbose_flag_counts() {
    let cli = Cli::try_parse_from(["stencil", "-vv", "build"]).unwrap();
    assert_eq!(cli.verbose, 2);
}
