//! Descriptive statistics over the collected records.
//!
//! Everything here is a pure function of records already on disk; nothing
//! touches the network.

pub mod completion;
pub mod export;
pub mod fibers;
pub mod projects;
pub mod yarns;

pub use completion::{CompletionStats, completion_days, completion_stats, monthly_starts};
pub use fibers::{FiberAnalysis, FiberCorrelation};
pub use projects::{PatternPopularity, ProjectReport, analyze_projects};
pub use yarns::{YarnCoUsage, YarnPair, build_catalog};

use std::collections::BTreeMap;

/// Highest counts first; equal counts keep key order.
pub(crate) fn rank<K: Ord>(counts: BTreeMap<K, usize>, n: usize) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}
