//! The fetch task: one locator, one GET, one output file, one timing.
//!
//! `blocking` drives libcurl on the calling thread (sequential, threaded and
//! worker-process strategies); `streaming` drives reqwest on an async runtime
//! (cooperative strategy). Both return a `FetchResult` and never panic or
//! propagate a per-task error.

mod blocking;
mod streaming;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{FetchBenchConfig, WriteMode};
use crate::error::{ErrorKind, FetchError};
use crate::storage::WrittenFile;
use crate::url_model::ResourceLocator;

pub use blocking::fetch_blocking;
pub use streaming::{build_client, fetch_streaming};

/// Settings shared by every fetch in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Directory the output files land in.
    pub output_dir: PathBuf,
    pub write_mode: WriteMode,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl FetchOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            write_mode: WriteMode::default(),
            connect_timeout: None,
            request_timeout: None,
        }
    }

    pub fn from_config(cfg: &FetchBenchConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            write_mode: cfg.write_mode.unwrap_or_default(),
            connect_timeout: cfg.connect_timeout(),
            request_timeout: cfg.request_timeout(),
        }
    }
}

/// How one fetch ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { bytes: u64, sha256: String },
    Failed { kind: ErrorKind, message: String },
}

/// Result of one fetch task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub locator: ResourceLocator,
    /// Derived local filename; `None` when the locator was malformed.
    pub filename: Option<String>,
    pub elapsed_secs: f64,
    pub outcome: Outcome,
}

impl FetchResult {
    pub(crate) fn from_attempt(
        locator: &ResourceLocator,
        filename: Option<String>,
        elapsed: Duration,
        attempt: Result<WrittenFile, FetchError>,
    ) -> Self {
        match attempt {
            Ok(written) => {
                tracing::debug!(
                    bytes = written.bytes,
                    elapsed_secs = elapsed.as_secs_f64(),
                    "fetched {} -> {}",
                    locator,
                    written.path.display()
                );
                FetchResult {
                    locator: locator.clone(),
                    filename,
                    elapsed_secs: elapsed.as_secs_f64(),
                    outcome: Outcome::Success {
                        bytes: written.bytes,
                        sha256: written.sha256,
                    },
                }
            }
            Err(e) => Self::failed(locator, filename, &e, elapsed),
        }
    }

    /// Failed result for `locator`; logs the error at `warn`.
    pub fn failed(
        locator: &ResourceLocator,
        filename: Option<String>,
        error: &FetchError,
        elapsed: Duration,
    ) -> Self {
        tracing::warn!(kind = %error.kind(), "fetch {} failed: {}", locator, error);
        FetchResult {
            locator: locator.clone(),
            filename,
            elapsed_secs: elapsed.as_secs_f64(),
            outcome: Outcome::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn sha256(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { sha256, .. } => Some(sha256),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failed { kind, .. } => Some(*kind),
        }
    }
}
