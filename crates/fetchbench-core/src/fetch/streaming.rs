//! Async GET via reqwest; the body is streamed chunk by chunk to `tokio::fs`.

use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Instant;

use super::{FetchOptions, FetchResult};
use crate::error::FetchError;
use crate::storage::{AsyncOutputFile, WrittenFile};
use crate::url_model::ResourceLocator;

/// Builds the client shared by every task of one cooperative run.
pub fn build_client(opts: &FetchOptions) -> Result<Client, FetchError> {
    let mut builder = Client::builder().redirect(reqwest::redirect::Policy::limited(10));
    if let Some(t) = opts.connect_timeout {
        builder = builder.connect_timeout(t);
    }
    if let Some(t) = opts.request_timeout {
        builder = builder.timeout(t);
    }
    Ok(builder.build()?)
}

/// Async fetch task. Suspends only at request send, chunk reads and file writes.
pub async fn fetch_streaming(
    client: &Client,
    locator: &ResourceLocator,
    opts: &FetchOptions,
) -> FetchResult {
    let start = Instant::now();
    let (filename, attempt) = match locator.local_filename() {
        Ok(name) => {
            let dest = opts.output_dir.join(&name);
            (
                Some(name.to_string()),
                stream_to_file(client, locator, &dest, opts).await,
            )
        }
        Err(e) => (None, Err(e)),
    };
    FetchResult::from_attempt(locator, filename, start.elapsed(), attempt)
}

async fn stream_to_file(
    client: &Client,
    locator: &ResourceLocator,
    dest: &Path,
    opts: &FetchOptions,
) -> Result<WrittenFile, FetchError> {
    tracing::debug!("GET {} -> {} (streaming)", locator, dest.display());

    let response = client.get(locator.url().clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: locator.to_string(),
            status: u32::from(status.as_u16()),
        });
    }

    let mut file = AsyncOutputFile::create(dest, opts.write_mode).await?;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let written = match chunk {
            Ok(bytes) => file.write_chunk(&bytes).await.map_err(FetchError::from),
            Err(e) => Err(FetchError::from(e)),
        };
        if let Err(e) = written {
            file.discard().await;
            return Err(e);
        }
    }
    Ok(file.finish().await?)
}
