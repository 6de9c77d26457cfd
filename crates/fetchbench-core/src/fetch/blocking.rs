//! Blocking GET via libcurl, streamed into the output file.

use std::io;
use std::path::Path;
use std::time::Instant;

use super::{FetchOptions, FetchResult};
use crate::error::FetchError;
use crate::storage::{OutputFile, WrittenFile};
use crate::url_model::ResourceLocator;

/// Fetches `locator` into `opts.output_dir` on the current thread.
///
/// The filename is derived before any network traffic, so a malformed
/// locator fails immediately. The output file is only created once the
/// server has answered 2xx, so an HTTP error never leaves a file behind.
pub fn fetch_blocking(locator: &ResourceLocator, opts: &FetchOptions) -> FetchResult {
    let start = Instant::now();
    let (filename, attempt) = match locator.local_filename() {
        Ok(name) => {
            let dest = opts.output_dir.join(&name);
            (Some(name.to_string()), download_to_file(locator, &dest, opts))
        }
        Err(e) => (None, Err(e)),
    };
    FetchResult::from_attempt(locator, filename, start.elapsed(), attempt)
}

fn download_to_file(
    locator: &ResourceLocator,
    dest: &Path,
    opts: &FetchOptions,
) -> Result<WrittenFile, FetchError> {
    tracing::debug!("GET {} -> {}", locator, dest.display());

    let mut easy = curl::easy::Easy::new();
    easy.url(locator.as_str())?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    // Abort on >= 400 before any body byte reaches the write callback.
    easy.fail_on_error(true)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.request_timeout {
        easy.timeout(t)?;
    }

    let mut output: Option<OutputFile> = None;
    let mut storage_error: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if output.is_none() {
                match OutputFile::create(dest, opts.write_mode) {
                    Ok(file) => output = Some(file),
                    Err(e) => {
                        storage_error = Some(e);
                        return Ok(0); // abort transfer
                    }
                }
            }
            let Some(file) = output.as_mut() else {
                return Ok(0);
            };
            match file.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    storage_error = Some(e);
                    Ok(0)
                }
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = performed {
        if let Some(file) = output {
            file.discard();
        }
        if e.is_write_error() {
            if let Some(io_err) = storage_error {
                return Err(FetchError::Filesystem(io_err));
            }
        }
        if e.is_http_returned_error() {
            let status = easy.response_code().unwrap_or(0);
            return Err(FetchError::HttpStatus {
                url: locator.to_string(),
                status,
            });
        }
        return Err(FetchError::Curl(e));
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        if let Some(file) = output {
            file.discard();
        }
        return Err(FetchError::HttpStatus {
            url: locator.to_string(),
            status,
        });
    }

    // An empty 2xx body never triggers the write callback.
    let file = match output {
        Some(file) => file,
        None => OutputFile::create(dest, opts.write_mode)?,
    };
    Ok(file.finish()?)
}
