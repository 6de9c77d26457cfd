//! Per-task fetch errors.
//!
//! A `FetchError` never escapes a strategy runner: it is folded into the
//! task's `FetchResult` as an `ErrorKind` plus message so sibling tasks keep
//! running and the result can cross a process boundary as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by a single fetch (HTTP, transport, storage, or locator).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Locator has no usable final path segment (or is not an http(s) URL).
    #[error("malformed locator {url}: {reason}")]
    MalformedLocator { url: String, reason: String },
    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },
    /// libcurl reported a transport failure (connect, DNS, timeout, ...).
    #[error("transport: {0}")]
    Curl(#[from] curl::Error),
    /// reqwest reported a transport failure.
    #[error("transport: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Creating, writing or renaming the output file failed.
    #[error("filesystem: {0}")]
    Filesystem(#[from] std::io::Error),
    /// A worker process or thread died without reporting a result.
    #[error("worker: {0}")]
    Worker(String),
}

/// Coarse error classification carried in `FetchResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Filesystem,
    MalformedLocator,
    Worker,
}

impl FetchError {
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        FetchError::MalformedLocator {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::MalformedLocator { .. } => ErrorKind::MalformedLocator,
            FetchError::HttpStatus { .. } | FetchError::Curl(_) | FetchError::Reqwest(_) => {
                ErrorKind::Network
            }
            FetchError::Filesystem(_) => ErrorKind::Filesystem,
            FetchError::Worker(_) => ErrorKind::Worker,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Network => "network",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::MalformedLocator => "malformed locator",
            ErrorKind::Worker => "worker",
        };
        f.write_str(s)
    }
}
