//! `fetchbench run --strategy <name> [URLS]...` – run one strategy.

use anyhow::Result;
use fetchbench_core::config::FetchBenchConfig;
use fetchbench_core::strategy::Strategy;

use super::prepare;
use crate::cli::console::ConsoleObserver;
use crate::cli::RunArgs;

pub fn run_single(cfg: &FetchBenchConfig, args: &RunArgs, strategy: Strategy) -> Result<()> {
    let prepared = prepare(cfg, args)?;
    let observer = ConsoleObserver;
    let runner = prepared.runner(&observer)?;
    let report = runner.run(strategy, &prepared.inputs.locators);
    println!(
        "{} of {} fetched",
        report.succeeded(),
        report.results.len()
    );
    Ok(())
}
