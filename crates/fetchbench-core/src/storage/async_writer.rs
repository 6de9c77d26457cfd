//! Async output file writer (tokio::fs) for the cooperative strategy.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::{write_path, WrittenFile};
use crate::checksum::ContentDigest;
use crate::config::WriteMode;

/// Async counterpart of `OutputFile`; same naming and discard rules.
pub struct AsyncOutputFile {
    file: File,
    write_path: PathBuf,
    final_path: PathBuf,
    mode: WriteMode,
    digest: ContentDigest,
}

impl AsyncOutputFile {
    pub async fn create(final_path: &Path, mode: WriteMode) -> io::Result<Self> {
        let write_path = write_path(final_path, mode);
        let file = File::create(&write_path).await?;
        Ok(AsyncOutputFile {
            file,
            write_path,
            final_path: final_path.to_path_buf(),
            mode,
            digest: ContentDigest::new(),
        })
    }

    pub async fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data).await?;
        self.digest.update(data);
        Ok(())
    }

    pub async fn finish(mut self) -> io::Result<WrittenFile> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        drop(self.file);
        if self.mode == WriteMode::Atomic {
            tokio::fs::rename(&self.write_path, &self.final_path).await?;
        }
        let (bytes, sha256) = self.digest.finish();
        Ok(WrittenFile {
            path: self.final_path,
            bytes,
            sha256,
        })
    }

    pub async fn discard(self) {
        drop(self.file);
        match self.mode {
            WriteMode::Atomic => {
                if let Err(e) = tokio::fs::remove_file(&self.write_path).await {
                    tracing::warn!("failed to remove {}: {}", self.write_path.display(), e);
                }
            }
            WriteMode::InPlace => {
                tracing::warn!(
                    bytes = self.digest.bytes(),
                    "partial file left at {}",
                    self.write_path.display()
                );
            }
        }
    }
}
