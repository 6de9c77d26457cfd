//! Bounded worker pool shared by the threaded and multi-process strategies.
//!
//! Every worker is started before any is joined. Workers pull locator
//! indices from one queue and send results back over a channel, so the
//! caller sees results in completion order.

use std::collections::VecDeque;
use std::sync::{mpsc, Mutex};
use std::time::Duration;

use crate::error::FetchError;
use crate::fetch::FetchResult;
use crate::url_model::ResourceLocator;

/// Runs `job` once per locator on at most `workers` threads.
///
/// `on_result` is called on the calling thread as each result arrives.
/// Always returns exactly one result per locator: items a worker never
/// reported (panic, failed spawn) come back as `worker` failures.
pub(crate) fn run_pool<F>(
    locators: &[ResourceLocator],
    workers: usize,
    on_result: &mut dyn FnMut(&FetchResult),
    job: F,
) -> Vec<FetchResult>
where
    F: Fn(&ResourceLocator) -> FetchResult + Sync,
{
    if locators.is_empty() {
        return Vec::new();
    }

    let queue: Mutex<VecDeque<usize>> = Mutex::new((0..locators.len()).collect());
    let num_workers = workers.max(1).min(locators.len());
    let mut reported = vec![false; locators.len()];
    let mut results = Vec::with_capacity(locators.len());

    std::thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<(usize, FetchResult)>();
        let mut handles = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let tx = tx.clone();
            let queue = &queue;
            let job = &job;
            let spawned = std::thread::Builder::new()
                .name(format!("fetch-worker-{id}"))
                .spawn_scoped(scope, move || loop {
                    let next = queue
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .pop_front();
                    let Some(index) = next else {
                        break;
                    };
                    let result = job(&locators[index]);
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => tracing::warn!("failed to spawn fetch worker {}: {}", id, e),
            }
        }
        drop(tx);

        for (index, result) in rx {
            on_result(&result);
            reported[index] = true;
            results.push(result);
        }

        for handle in handles {
            if handle.join().is_err() {
                tracing::warn!("fetch worker panicked");
            }
        }
    });

    for (index, locator) in locators.iter().enumerate() {
        if reported[index] {
            continue;
        }
        let err = FetchError::Worker("worker exited before reporting a result".into());
        let filename = locator.local_filename().ok().map(|n| n.to_string());
        let result = FetchResult::failed(locator, filename, &err, Duration::ZERO);
        on_result(&result);
        results.push(result);
    }

    results
}
