//! Blocking fetches on a bounded pool of OS threads.

use super::pool::run_pool;
use crate::fetch::{fetch_blocking, FetchOptions, FetchResult};
use crate::url_model::ResourceLocator;

pub(super) fn run_threaded(
    locators: &[ResourceLocator],
    opts: &FetchOptions,
    workers: usize,
    on_result: &mut dyn FnMut(&FetchResult),
) -> Vec<FetchResult> {
    run_pool(locators, workers, on_result, |locator| {
        fetch_blocking(locator, opts)
    })
}
