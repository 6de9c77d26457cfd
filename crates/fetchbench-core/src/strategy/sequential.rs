//! One fetch at a time, in input order, on the calling thread.

use crate::fetch::{fetch_blocking, FetchOptions, FetchResult};
use crate::url_model::ResourceLocator;

pub(super) fn run_sequential(
    locators: &[ResourceLocator],
    opts: &FetchOptions,
    on_result: &mut dyn FnMut(&FetchResult),
) -> Vec<FetchResult> {
    locators
        .iter()
        .map(|locator| {
            let result = fetch_blocking(locator, opts);
            on_result(&result);
            result
        })
        .collect()
}
