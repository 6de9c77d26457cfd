//! Input list resolution: command-line locators, url files, built-in samples.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::FetchError;
use crate::url_model::ResourceLocator;

/// Sample images fetched when no locator is given.
pub const DEFAULT_LOCATORS: [&str; 11] = [
    "https://i.imgur.com/ycPp6on.jpeg",
    "https://i.imgur.com/UkgrtOf.jpeg",
    "https://i.imgur.com/S7tCJwu.png",
    "https://i.imgur.com/kaDG46g.jpeg",
    "https://i.imgur.com/XOyxsrX.jpeg",
    "https://i.imgur.com/HNxiNiZ.jpeg",
    "https://i.imgur.com/vdVviPZ.jpeg",
    "https://i.imgur.com/ml0X70b.jpeg",
    "https://i.imgur.com/8cQGxFf.jpeg",
    "https://i.imgur.com/B4W0pDk.jpeg",
    "https://i.imgur.com/Gp2gKOC.jpeg",
];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no usable locators ({rejected} rejected)")]
    NoLocators { rejected: usize },
    #[error("read url file {}: {source}", .path.display())]
    UrlFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Locators that parsed, plus the inputs that didn't and why.
#[derive(Debug)]
pub struct ResolvedInputs {
    pub locators: Vec<ResourceLocator>,
    pub rejected: Vec<(String, FetchError)>,
}

/// Resolves the run's input list.
///
/// `args` empty → `defaults` (or `DEFAULT_LOCATORS` when `None`). Entries
/// that don't parse are logged and skipped; an empty result is an error.
pub fn resolve_locators(
    args: &[String],
    defaults: Option<&[String]>,
) -> Result<ResolvedInputs, InputError> {
    let raw: Vec<String> = if !args.is_empty() {
        args.to_vec()
    } else {
        match defaults {
            Some(list) => list.to_vec(),
            None => DEFAULT_LOCATORS.iter().map(|s| s.to_string()).collect(),
        }
    };

    let mut locators = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();
    for input in raw {
        match ResourceLocator::parse(&input) {
            Ok(locator) => locators.push(locator),
            Err(e) => {
                tracing::warn!("skipping {:?}: {}", input, e);
                rejected.push((input, e));
            }
        }
    }

    if locators.is_empty() {
        return Err(InputError::NoLocators {
            rejected: rejected.len(),
        });
    }

    for name in duplicate_filenames(&locators) {
        tracing::warn!("several locators map to {}; the last one written wins", name);
    }

    Ok(ResolvedInputs { locators, rejected })
}

/// Reads one locator per line; blank lines and `#` comments are skipped.
pub fn read_url_file(path: &Path) -> Result<Vec<String>, InputError> {
    let data = std::fs::read_to_string(path).map_err(|source| InputError::UrlFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Filenames derived from more than one locator, sorted.
pub fn duplicate_filenames(locators: &[ResourceLocator]) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for name in locators.iter().filter_map(|l| l.local_filename().ok()) {
        *counts.entry(name.to_string()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect()
}
