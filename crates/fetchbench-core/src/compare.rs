//! Comparison mode: every strategy over the same input list, one pass each.
//!
//! Strategies run strictly one after another in `Strategy::ALL` order; the
//! report keeps their aggregate times side by side, names the fastest one,
//! and flags files whose content differed between strategies.

use std::collections::{BTreeMap, BTreeSet};

use crate::strategy::{Strategy, StrategyReport, StrategyRunner};
use crate::url_model::ResourceLocator;

/// Reports of every strategy that ran, in run order.
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    pub reports: Vec<StrategyReport>,
}

impl ComparisonReport {
    pub fn get(&self, strategy: Strategy) -> Option<&StrategyReport> {
        self.reports.iter().find(|r| r.strategy == strategy)
    }

    /// Fastest strategy: prefer runs without failures; if every run had
    /// failures, the fastest overall.
    pub fn fastest(&self) -> Option<Strategy> {
        let by_time = |a: &&StrategyReport, b: &&StrategyReport| {
            a.elapsed_secs
                .partial_cmp(&b.elapsed_secs)
                .unwrap_or(std::cmp::Ordering::Equal)
        };
        self.reports
            .iter()
            .filter(|r| r.failed() == 0)
            .min_by(by_time)
            .or_else(|| self.reports.iter().min_by(by_time))
            .map(|r| r.strategy)
    }

    /// Filenames written with different content by different fetches
    /// (across strategies, or by colliding locators within one).
    pub fn digest_mismatches(&self) -> Vec<String> {
        let mut digests: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for result in self.reports.iter().flat_map(|r| &r.results) {
            if let (Some(name), Some(sha)) = (result.filename.as_deref(), result.sha256()) {
                digests.entry(name).or_default().insert(sha);
            }
        }
        digests
            .into_iter()
            .filter(|(_, set)| set.len() > 1)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// Runs `strategies` in order over `locators`, each fully drained before the next.
pub fn run_comparison(
    runner: &StrategyRunner<'_>,
    strategies: &[Strategy],
    locators: &[ResourceLocator],
) -> ComparisonReport {
    let reports = strategies
        .iter()
        .map(|&strategy| runner.run(strategy, locators))
        .collect();
    let report = ComparisonReport { reports };
    for name in report.digest_mismatches() {
        tracing::warn!("{} was written with differing content", name);
    }
    report
}
