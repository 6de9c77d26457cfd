//! Blocking output file writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{write_path, WrittenFile};
use crate::checksum::ContentDigest;
use crate::config::WriteMode;

/// Output file being filled by one blocking transfer. Not shared between tasks.
pub struct OutputFile {
    file: BufWriter<File>,
    write_path: PathBuf,
    final_path: PathBuf,
    mode: WriteMode,
    digest: ContentDigest,
}

impl OutputFile {
    /// Create (or truncate) the file a transfer writes into.
    pub fn create(final_path: &Path, mode: WriteMode) -> io::Result<Self> {
        let write_path = write_path(final_path, mode);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&write_path)?;
        Ok(OutputFile {
            file: BufWriter::new(file),
            write_path,
            final_path: final_path.to_path_buf(),
            mode,
            digest: ContentDigest::new(),
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Flush and, in atomic mode, rename the temp file over the final name.
    pub fn finish(self) -> io::Result<WrittenFile> {
        let OutputFile {
            file,
            write_path,
            final_path,
            mode,
            digest,
        } = self;
        let file = file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        if mode == WriteMode::Atomic {
            std::fs::rename(&write_path, &final_path)?;
        }
        let (bytes, sha256) = digest.finish();
        Ok(WrittenFile {
            path: final_path,
            bytes,
            sha256,
        })
    }

    /// Abandon the transfer. Atomic mode removes the temp file; in-place keeps what was written.
    pub fn discard(self) {
        let OutputFile {
            file,
            write_path,
            mode,
            digest,
            ..
        } = self;
        drop(file);
        match mode {
            WriteMode::Atomic => {
                if let Err(e) = std::fs::remove_file(&write_path) {
                    tracing::warn!("failed to remove {}: {}", write_path.display(), e);
                }
            }
            WriteMode::InPlace => {
                tracing::warn!(
                    bytes = digest.bytes(),
                    "partial file left at {}",
                    write_path.display()
                );
            }
        }
    }
}
