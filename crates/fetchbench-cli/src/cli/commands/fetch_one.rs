//! Hidden `fetch-one` worker: one blocking fetch, result as a JSON line on stdout.

use anyhow::{Context, Result};
use fetchbench_core::config::WriteMode;
use fetchbench_core::fetch::{fetch_blocking, FetchOptions};
use fetchbench_core::url_model::ResourceLocator;
use std::path::PathBuf;
use std::time::Duration;

pub fn run_fetch_one(
    url: &str,
    output_dir: PathBuf,
    write_mode: WriteMode,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
) -> Result<()> {
    let locator = ResourceLocator::parse(url)?;
    let options = FetchOptions {
        output_dir,
        write_mode,
        connect_timeout: connect_timeout_secs.map(Duration::from_secs),
        request_timeout: request_timeout_secs.map(Duration::from_secs),
    };
    tracing::debug!(pid = std::process::id(), "worker fetching {}", locator);
    let result = fetch_blocking(&locator, &options);
    let line = serde_json::to_string(&result).context("encode fetch result")?;
    println!("{}", line);
    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
