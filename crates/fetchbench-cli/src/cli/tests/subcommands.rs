//! Tests for run, completions and the hidden worker subcommand.

use super::parse;
use crate::cli::{CliCommand, StrategyArg};
use fetchbench_core::config::WriteMode;
use fetchbench_core::strategy::{Strategy, WORKER_SUBCOMMAND};
use std::path::Path;

#[test]
fn cli_parse_run_single_strategy() {
    match parse(&["fetchbench", "run", "--strategy", "multi-process", "http://x/a.png"]).command {
        Some(CliCommand::Run { strategy, args }) => {
            assert_eq!(strategy, StrategyArg::MultiProcess);
            assert_eq!(Strategy::from(strategy), Strategy::MultiProcess);
            assert_eq!(args.urls, ["http://x/a.png"]);
        }
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn cli_parse_run_with_config_after_subcommand() {
    let cli = parse(&["fetchbench", "run", "-s", "async", "--config", "c.toml"]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("c.toml")));
    match cli.command {
        Some(CliCommand::Run { strategy, args }) => {
            assert_eq!(strategy, StrategyArg::Async);
            assert!(args.urls.is_empty());
        }
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["fetchbench", "completions", "bash"]).command {
        Some(CliCommand::Completions { shell }) => assert_eq!(shell, clap_complete::Shell::Bash),
        other => panic!("expected Completions, got {other:?}"),
    }
}

#[test]
fn cli_parse_worker_args_from_core() {
    // Arguments exactly as the multi-process strategy builds them.
    let mut opts = fetchbench_core::fetch::FetchOptions::new("/tmp/out");
    opts.write_mode = WriteMode::InPlace;
    opts.connect_timeout = Some(std::time::Duration::from_secs(4));
    let worker = fetchbench_core::strategy::WorkerCommand::new("fetchbench");
    let locator = fetchbench_core::url_model::ResourceLocator::parse("http://x/a.png").unwrap();
    let mut argv = vec!["fetchbench".to_string()];
    argv.extend(
        worker
            .args(&locator, &opts)
            .into_iter()
            .map(|a| a.into_string().unwrap()),
    );
    assert_eq!(argv[1], WORKER_SUBCOMMAND);

    let argv: Vec<&str> = argv.iter().map(String::as_str).collect();
    match parse(&argv).command {
        Some(CliCommand::FetchOne {
            url,
            output_dir,
            write_mode,
            connect_timeout_secs,
            request_timeout_secs,
        }) => {
            assert_eq!(url, "http://x/a.png");
            assert_eq!(output_dir, Path::new("/tmp/out"));
            assert_eq!(write_mode, WriteMode::InPlace);
            assert_eq!(connect_timeout_secs, Some(4));
            assert_eq!(request_timeout_secs, None);
        }
        other => panic!("expected FetchOne, got {other:?}"),
    }
}
