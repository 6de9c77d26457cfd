//! Output file lifecycle.
//!
//! Bodies are streamed into an output file chosen by `WriteMode`: either a
//! `.part` temp file atomically renamed over the final name on success, or
//! the final name directly. Every chunk also feeds a `ContentDigest` so the
//! caller gets byte count and SHA-256 without re-reading the file.

mod async_writer;
mod writer;

use std::path::{Path, PathBuf};

pub use async_writer::AsyncOutputFile;
pub use writer::OutputFile;

use crate::config::WriteMode;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Path actually written while a transfer is in progress.
pub(crate) fn write_path(final_path: &Path, mode: WriteMode) -> PathBuf {
    match mode {
        WriteMode::Atomic => temp_path(final_path),
        WriteMode::InPlace => final_path.to_path_buf(),
    }
}

/// A completed output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}
