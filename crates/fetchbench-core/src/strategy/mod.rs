//! Strategy runners: the same fetch task under four concurrency disciplines.
//!
//! - sequential: one fetch at a time, input order
//! - threaded: bounded pool of OS threads
//! - multi-process: bounded pool of child processes
//! - async: one current-thread runtime, fetches multiplexed cooperatively
//!
//! Each runner returns only after every fetch has finished, and always yields
//! one `FetchResult` per input locator.

mod cooperative;
mod pool;
mod process;
mod sequential;
mod threaded;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::FetchBenchConfig;
use crate::error::FetchError;
use crate::fetch::{FetchOptions, FetchResult};
use crate::url_model::ResourceLocator;

pub use process::{parse_worker_output, WorkerCommand, WORKER_SUBCOMMAND};

/// Concurrency discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Sequential,
    Threaded,
    MultiProcess,
    Async,
}

impl Strategy {
    /// Fixed comparison order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Sequential,
        Strategy::Threaded,
        Strategy::MultiProcess,
        Strategy::Async,
    ];

    /// Identifier used on the command line and in config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Threaded => "threaded",
            Strategy::MultiProcess => "multi-process",
            Strategy::Async => "async",
        }
    }

    /// Human label for console output ("<label> approach: <secs>").
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Sequential => "Sequential",
            Strategy::Threaded => "Multithreaded",
            Strategy::MultiProcess => "Multiprocess",
            Strategy::Async => "Asynchronous",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate outcome of one strategy over the whole input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: Strategy,
    /// Wall-clock time for the whole batch.
    pub elapsed_secs: f64,
    /// Input order for sequential, completion order otherwise.
    pub results: Vec<FetchResult>,
}

impl StrategyReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Longest single fetch.
    pub fn max_task_secs(&self) -> f64 {
        self.results
            .iter()
            .map(|r| r.elapsed_secs)
            .fold(0.0, f64::max)
    }

    /// Sum of all fetch times.
    pub fn total_task_secs(&self) -> f64 {
        self.results.iter().map(|r| r.elapsed_secs).sum()
    }
}

/// Upper bounds on concurrency per strategy (each at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    pub threads: usize,
    pub processes: usize,
    pub async_tasks: usize,
}

impl PoolLimits {
    pub fn from_config(cfg: &FetchBenchConfig) -> Self {
        Self {
            threads: cfg.thread_workers.max(1),
            processes: cfg.process_workers.max(1),
            async_tasks: cfg.async_tasks.max(1),
        }
    }
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self::from_config(&FetchBenchConfig::default())
    }
}

/// Receives progress as strategies run. Called on the runner's own thread.
pub trait RunObserver {
    fn strategy_started(&self, _strategy: Strategy, _count: usize) {}
    fn fetch_finished(&self, _strategy: Strategy, _result: &FetchResult) {}
    fn strategy_finished(&self, _report: &StrategyReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Runs strategies over a locator list with shared fetch options.
pub struct StrategyRunner<'a> {
    options: FetchOptions,
    limits: PoolLimits,
    worker: Option<WorkerCommand>,
    observer: &'a dyn RunObserver,
}

impl<'a> StrategyRunner<'a> {
    pub fn new(options: FetchOptions, limits: PoolLimits, observer: &'a dyn RunObserver) -> Self {
        Self {
            options,
            limits,
            worker: None,
            observer,
        }
    }

    /// Executable used by the multi-process strategy. Without one, every
    /// multi-process fetch fails with a `worker` error.
    pub fn with_worker(mut self, worker: WorkerCommand) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Runs one strategy to completion.
    ///
    /// Never fails as a whole: if the strategy can't even start (no worker
    /// executable, runtime construction error) every locator is reported as
    /// failed with that error, and siblings of a failed fetch always run.
    pub fn run(&self, strategy: Strategy, locators: &[ResourceLocator]) -> StrategyReport {
        self.observer.strategy_started(strategy, locators.len());
        tracing::info!(strategy = %strategy, count = locators.len(), "strategy started");

        let observer = self.observer;
        let mut on_result = |r: &FetchResult| observer.fetch_finished(strategy, r);
        let opts = &self.options;

        let start = Instant::now();
        let results = match strategy {
            Strategy::Sequential => sequential::run_sequential(locators, opts, &mut on_result),
            Strategy::Threaded => {
                threaded::run_threaded(locators, opts, self.limits.threads, &mut on_result)
            }
            Strategy::MultiProcess => match &self.worker {
                Some(worker) => process::run_multi_process(
                    locators,
                    opts,
                    worker,
                    self.limits.processes,
                    &mut on_result,
                ),
                None => fail_all(locators, "no worker executable configured", &mut on_result),
            },
            Strategy::Async => {
                match cooperative::run_cooperative(
                    locators,
                    opts,
                    self.limits.async_tasks,
                    &mut on_result,
                ) {
                    Ok(results) => results,
                    Err(e) => fail_all(locators, &format!("{:#}", e), &mut on_result),
                }
            }
        };
        let elapsed = start.elapsed();

        let report = StrategyReport {
            strategy,
            elapsed_secs: elapsed.as_secs_f64(),
            results,
        };
        tracing::info!(
            strategy = %strategy,
            elapsed_secs = report.elapsed_secs,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "strategy finished"
        );
        self.observer.strategy_finished(&report);
        report
    }
}

fn fail_all(
    locators: &[ResourceLocator],
    reason: &str,
    on_result: &mut dyn FnMut(&FetchResult),
) -> Vec<FetchResult> {
    locators
        .iter()
        .map(|locator| {
            let err = FetchError::Worker(reason.to_string());
            let filename = locator.local_filename().ok().map(|n| n.to_string());
            let result = FetchResult::failed(locator, filename, &err, Duration::ZERO);
            on_result(&result);
            result
        })
        .collect()
}
