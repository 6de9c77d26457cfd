//! Resource locators and local filename derivation.
//!
//! A locator is an absolute http(s) URL; its local filename is the final
//! path segment, percent-decoded and made safe for Linux. Derivation is a
//! pure function of the locator. Distinct locators that share a final
//! segment map to the same filename (last writer wins).

mod path;
mod sanitize;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

pub use path::final_path_segment;
pub use sanitize::sanitize_filename_for_linux;

/// Absolute http/https URL identifying one remote resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceLocator(url::Url);

impl ResourceLocator {
    /// Parses and validates a locator: http or https scheme, non-empty host.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FetchError::malformed(input, "empty locator"));
        }
        let url = url::Url::parse(trimmed)
            .map_err(|e| FetchError::malformed(trimmed, e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(FetchError::malformed(
                    trimmed,
                    format!("unsupported scheme {other:?}"),
                ))
            }
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(FetchError::malformed(trimmed, "missing host"));
        }
        Ok(ResourceLocator(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &url::Url {
        &self.0
    }

    /// Derives the local filename from the final path segment.
    pub fn local_filename(&self) -> Result<LocalFilename, FetchError> {
        let segment = final_path_segment(&self.0)
            .ok_or_else(|| FetchError::malformed(self.as_str(), "path has no final segment"))?;
        let name = sanitize_filename_for_linux(&segment);
        if name.is_empty() || name == "." || name == ".." {
            return Err(FetchError::malformed(
                self.as_str(),
                format!("final segment {segment:?} is not a usable filename"),
            ));
        }
        Ok(LocalFilename(name))
    }
}

impl FromStr for ResourceLocator {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceLocator::parse(s)
    }
}

impl TryFrom<String> for ResourceLocator {
    type Error = FetchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ResourceLocator::parse(&value)
    }
}

impl From<ResourceLocator> for String {
    fn from(value: ResourceLocator) -> Self {
        value.0.into()
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty file name (no path separators) derived from a locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalFilename(String);

impl LocalFilename {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for LocalFilename {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl fmt::Display for LocalFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
