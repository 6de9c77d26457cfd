//! Console output: per-fetch lines, per-strategy totals, final comparison.

use fetchbench_core::compare::ComparisonReport;
use fetchbench_core::fetch::{FetchResult, Outcome};
use fetchbench_core::strategy::{RunObserver, Strategy, StrategyReport};

/// Prints progress to stdout as strategies run.
pub struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn strategy_started(&self, strategy: Strategy, count: usize) {
        println!();
        println!("Starting {} approach ({} URLs).", strategy.label().to_lowercase(), count);
    }

    fn fetch_finished(&self, _strategy: Strategy, result: &FetchResult) {
        println!("{}", fetch_line(result));
    }

    fn strategy_finished(&self, report: &StrategyReport) {
        println!("{}", approach_line(report.strategy, report.elapsed_secs));
    }
}

pub fn fetch_line(result: &FetchResult) -> String {
    match &result.outcome {
        Outcome::Success { .. } => format!("elapsed time: {:.6}", result.elapsed_secs),
        Outcome::Failed { message, .. } => format!(
            "failed: {}: {} (elapsed time: {:.6})",
            result.locator, message, result.elapsed_secs
        ),
    }
}

pub fn approach_line(strategy: Strategy, elapsed_secs: f64) -> String {
    format!("{} approach: {:.6}", strategy.label(), elapsed_secs)
}

/// Final block: every strategy's aggregate time, then fastest and warnings.
pub fn print_summary(report: &ComparisonReport) {
    println!();
    for r in &report.reports {
        let failures = if r.failed() > 0 {
            format!(" ({} of {} failed)", r.failed(), r.results.len())
        } else {
            String::new()
        };
        println!("{}{}", approach_line(r.strategy, r.elapsed_secs), failures);
    }
    if let Some(fastest) = report.fastest() {
        println!("Fastest: {}", fastest.label().to_lowercase());
    }
    for name in report.digest_mismatches() {
        println!("warning: {} was written with differing content", name);
    }
}
