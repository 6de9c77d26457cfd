//! Tests for the default (compare) mode.

use super::parse;
use crate::cli::{Cli, RunArgs};
use clap::Parser;
use fetchbench_core::config::{FetchBenchConfig, WriteMode};
use std::path::Path;

#[test]
fn cli_parse_no_args_compares_defaults() {
    let cli = parse(&["fetchbench"]);
    assert!(cli.command.is_none());
    assert!(cli.run.urls.is_empty());
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_positional_urls() {
    let cli = parse(&["fetchbench", "http://x/a.png", "http://x/b.png"]);
    assert!(cli.command.is_none());
    assert_eq!(cli.run.urls, ["http://x/a.png", "http://x/b.png"]);
}

#[test]
fn cli_parse_overrides() {
    let cli = parse(&[
        "fetchbench",
        "--output-dir",
        "/tmp/out",
        "--threads",
        "3",
        "--processes",
        "2",
        "--tasks",
        "7",
        "--write-mode",
        "in-place",
        "--url-file",
        "urls.txt",
        "--config",
        "c.toml",
        "http://x/a.png",
    ]);
    assert_eq!(cli.run.output_dir.as_deref(), Some(Path::new("/tmp/out")));
    assert_eq!(cli.run.url_file.as_deref(), Some(Path::new("urls.txt")));
    assert_eq!(cli.config.as_deref(), Some(Path::new("c.toml")));

    let mut cfg = FetchBenchConfig::default();
    cli.run.apply_to(&mut cfg);
    assert_eq!(cfg.thread_workers, 3);
    assert_eq!(cfg.process_workers, 2);
    assert_eq!(cfg.async_tasks, 7);
    assert_eq!(cfg.write_mode, Some(WriteMode::InPlace));
}

#[test]
fn no_overrides_keep_config() {
    let mut cfg = FetchBenchConfig::default();
    cfg.thread_workers = 5;
    RunArgs::default().apply_to(&mut cfg);
    assert_eq!(cfg.thread_workers, 5);
    assert!(cfg.write_mode.is_none());
}

#[test]
fn cli_rejects_bad_write_mode() {
    assert!(Cli::try_parse_from(["fetchbench", "--write-mode", "sometimes"]).is_err());
}
