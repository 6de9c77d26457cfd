//! `fetchbench [URLS]...` – run every strategy and print the comparison.

use anyhow::Result;
use fetchbench_core::compare::run_comparison;
use fetchbench_core::config::FetchBenchConfig;
use fetchbench_core::strategy::Strategy;

use super::prepare;
use crate::cli::console::{print_summary, ConsoleObserver};
use crate::cli::RunArgs;

pub fn run_compare(cfg: &FetchBenchConfig, args: &RunArgs) -> Result<()> {
    let prepared = prepare(cfg, args)?;
    let observer = ConsoleObserver;
    let runner = prepared.runner(&observer)?;
    let report = run_comparison(&runner, &Strategy::ALL, &prepared.inputs.locators);
    print_summary(&report);
    Ok(())
}
