//! Fetches in child processes, at most `workers` alive at once.
//!
//! The child is this program re-invoked with the hidden `fetch-one`
//! subcommand. It runs the blocking fetch and prints its `FetchResult` as a
//! single JSON line on stdout; nothing else is shared with the parent.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use super::pool::run_pool;
use crate::error::FetchError;
use crate::fetch::{FetchOptions, FetchResult};
use crate::url_model::ResourceLocator;

/// Subcommand a worker executable must accept.
pub const WORKER_SUBCOMMAND: &str = "fetch-one";

/// Executable that runs one fetch per child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    program: PathBuf,
}

impl WorkerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The currently running executable, which must understand `fetch-one`.
    pub fn current_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("locate current executable")?;
        Ok(Self::new(exe))
    }

    /// Argument list for one child: `fetch-one <url> --output-dir <dir> ...`.
    pub fn args(&self, locator: &ResourceLocator, opts: &FetchOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![WORKER_SUBCOMMAND.into()];
        args.push(locator.as_str().into());
        args.push("--output-dir".into());
        args.push(opts.output_dir.clone().into_os_string());
        args.push("--write-mode".into());
        args.push(opts.write_mode.as_str().into());
        if let Some(t) = opts.connect_timeout {
            args.push("--connect-timeout-secs".into());
            args.push(t.as_secs().to_string().into());
        }
        if let Some(t) = opts.request_timeout {
            args.push("--request-timeout-secs".into());
            args.push(t.as_secs().to_string().into());
        }
        args
    }

    /// Runs one child to completion and returns the result it reported.
    pub fn run(&self, locator: &ResourceLocator, opts: &FetchOptions) -> FetchResult {
        let start = Instant::now();
        let filename = locator.local_filename().ok().map(|n| n.to_string());
        let output = Command::new(&self.program)
            .args(self.args(locator, opts))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let err = FetchError::Worker(format!("spawn {}: {}", self.program.display(), e));
                return FetchResult::failed(locator, filename, &err, start.elapsed());
            }
        };

        match parse_worker_output(&output.stdout) {
            Some(result) if result.locator == *locator => result,
            Some(result) => {
                let err = FetchError::Worker(format!(
                    "worker reported {} instead of {}",
                    result.locator, locator
                ));
                FetchResult::failed(locator, filename, &err, start.elapsed())
            }
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let err = FetchError::Worker(format!(
                    "worker exited with {} without a result: {}",
                    output.status,
                    last_line(&stderr)
                ));
                FetchResult::failed(locator, filename, &err, start.elapsed())
            }
        }
    }
}

/// Parses the last JSON line a worker wrote to stdout.
pub fn parse_worker_output(stdout: &[u8]) -> Option<FetchResult> {
    String::from_utf8_lossy(stdout)
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{'))
        .and_then(|line| serde_json::from_str(line).ok())
}

fn last_line(s: &str) -> &str {
    s.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}

pub(super) fn run_multi_process(
    locators: &[ResourceLocator],
    opts: &FetchOptions,
    worker: &WorkerCommand,
    workers: usize,
    on_result: &mut dyn FnMut(&FetchResult),
) -> Vec<FetchResult> {
    run_pool(locators, workers, on_result, |locator| worker.run(locator, opts))
}
