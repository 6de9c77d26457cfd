//! All fetches multiplexed on one current-thread tokio runtime.

use anyhow::{Context, Result};
use futures_util::stream::{self, StreamExt};

use crate::fetch::{build_client, fetch_streaming, FetchOptions, FetchResult};
use crate::url_model::ResourceLocator;

/// Submits every locator as one stream and polls up to `max_in_flight`
/// fetches concurrently on a single OS thread. Must not be called from
/// inside another tokio runtime.
pub(super) fn run_cooperative(
    locators: &[ResourceLocator],
    opts: &FetchOptions,
    max_in_flight: usize,
    on_result: &mut dyn FnMut(&FetchResult),
) -> Result<Vec<FetchResult>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build current-thread runtime")?;

    rt.block_on(async {
        let client = build_client(opts).context("build HTTP client")?;
        let mut in_flight = stream::iter(locators)
            .map(|locator| fetch_streaming(&client, locator, opts))
            .buffer_unordered(max_in_flight.max(1));

        let mut results = Vec::with_capacity(locators.len());
        while let Some(result) = in_flight.next().await {
            on_result(&result);
            results.push(result);
        }
        Ok::<_, anyhow::Error>(results)
    })
}
