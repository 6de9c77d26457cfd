//! CLI command handlers.

mod compare;
mod completions;
mod fetch_one;
mod run;

pub use compare::run_compare;
pub use completions::run_completions;
pub use fetch_one::run_fetch_one;
pub use run::run_single;

use anyhow::{Context, Result};
use fetchbench_core::config::FetchBenchConfig;
use fetchbench_core::fetch::FetchOptions;
use fetchbench_core::inputs::{self, ResolvedInputs};
use fetchbench_core::strategy::{PoolLimits, RunObserver, StrategyRunner, WorkerCommand};

use super::RunArgs;

/// Config with CLI overrides applied, plus the resolved input list.
pub(super) struct Prepared {
    pub cfg: FetchBenchConfig,
    pub inputs: ResolvedInputs,
    pub options: FetchOptions,
}

pub(super) fn prepare(cfg: &FetchBenchConfig, args: &RunArgs) -> Result<Prepared> {
    let mut cfg = cfg.clone();
    args.apply_to(&mut cfg);

    let mut urls = args.urls.clone();
    if let Some(path) = &args.url_file {
        urls.extend(inputs::read_url_file(path)?);
    }
    let inputs = inputs::resolve_locators(&urls, cfg.default_urls.as_deref())?;
    for (input, err) in &inputs.rejected {
        println!("skipping {}: {}", input, err);
    }

    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };
    let options = FetchOptions::from_config(&cfg, output_dir);
    Ok(Prepared {
        cfg,
        inputs,
        options,
    })
}

impl Prepared {
    pub fn runner<'a>(&self, observer: &'a dyn RunObserver) -> Result<StrategyRunner<'a>> {
        let worker = WorkerCommand::current_exe()?;
        Ok(
            StrategyRunner::new(self.options.clone(), PoolLimits::from_config(&self.cfg), observer)
                .with_worker(worker),
        )
    }
}
