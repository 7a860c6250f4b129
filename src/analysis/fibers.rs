use std::collections::{BTreeMap, HashMap};

use super::rank;
use crate::models::{PatternYarnGroup, YarnFiberRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct FiberCorrelation {
    pub first: String,
    pub second: String,
    /// Pearson coefficient over per-pattern fiber counts.
    pub coefficient: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiberAnalysis {
    pub fiber_counts: BTreeMap<String, usize>,
    /// Keyed by the sorted fiber types of one yarn.
    pub combinations: BTreeMap<Vec<String>, usize>,
    pub by_pattern: BTreeMap<i64, BTreeMap<String, usize>>,
}

impl FiberAnalysis {
    /// Joins every yarn usage with the fiber content of its yarn.
    ///
    /// Usages without a yarn id, or whose yarn has no known fibers, are
    /// skipped. Projects without a pattern id still count toward fibers and
    /// combinations.
    #[must_use]
    pub fn from_records(groups: &[PatternYarnGroup], fibers: &[YarnFiberRecord]) -> Self {
        let by_yarn: HashMap<i64, &YarnFiberRecord> =
            fibers.iter().map(|f| (f.yarn_id, f)).collect();
        let mut analysis = Self::default();

        for record in groups.iter().flat_map(|g| g.entries.iter()) {
            for usage in &record.yarn_data {
                let Some(yarn) = usage.yarn_id.and_then(|id| by_yarn.get(&id)) else {
                    continue;
                };

                let mut combo = Vec::with_capacity(yarn.fiber_content.len());
                for fiber in &yarn.fiber_content {
                    *analysis
                        .fiber_counts
                        .entry(fiber.fiber_type.clone())
                        .or_default() += 1;
                    if let Some(pattern_id) = record.pattern_id {
                        *analysis
                            .by_pattern
                            .entry(pattern_id)
                            .or_default()
                            .entry(fiber.fiber_type.clone())
                            .or_default() += 1;
                    }
                    combo.push(fiber.fiber_type.clone());
                }

                if combo.len() > 1 {
                    combo.sort();
                    *analysis.combinations.entry(combo).or_default() += 1;
                }
            }
        }

        analysis
    }

    #[must_use]
    pub fn top_fibers(&self, n: usize) -> Vec<(String, usize)> {
        rank(self.fiber_counts.clone(), n)
    }

    #[must_use]
    pub fn top_combinations(&self, n: usize) -> Vec<(Vec<String>, usize)> {
        rank(self.combinations.clone(), n)
    }

    /// `(pattern_id, fiber, count)`, pattern ids then fibers ascending.
    #[must_use]
    pub fn pattern_rows(&self) -> Vec<(i64, &str, usize)> {
        self.by_pattern
            .iter()
            .flat_map(|(&pattern_id, fibers)| {
                fibers
                    .iter()
                    .map(move |(fiber, &count)| (pattern_id, fiber.as_str(), count))
            })
            .collect()
    }

    /// Pairwise Pearson correlation of fibers across patterns.
    ///
    /// A fiber missing from a pattern counts as zero there. Pairs involving a
    /// fiber with the same count in every pattern have no defined coefficient
    /// and are left out.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn correlations(&self) -> Vec<FiberCorrelation> {
        let patterns = self.by_pattern.len();
        if patterns < 2 {
            return Vec::new();
        }

        let fibers: Vec<&String> = self
            .by_pattern
            .values()
            .flat_map(BTreeMap::keys)
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        // Centered count vector and sum of squares per fiber.
        let centered: Vec<(Vec<f64>, f64)> = fibers
            .iter()
            .map(|fiber| {
                let counts: Vec<f64> = self
                    .by_pattern
                    .values()
                    .map(|m| m.get(*fiber).copied().unwrap_or_default() as f64)
                    .collect();
                let mean = counts.iter().sum::<f64>() / patterns as f64;
                let deviations: Vec<f64> = counts.iter().map(|c| c - mean).collect();
                let squares = deviations.iter().map(|d| d * d).sum();
                (deviations, squares)
            })
            .collect();

        let mut out = Vec::new();
        for (i, (da, sa)) in centered.iter().enumerate() {
            for (j, (db, sb)) in centered.iter().enumerate().skip(i + 1) {
                if *sa <= f64::EPSILON || *sb <= f64::EPSILON {
                    continue;
                }
                let covariance: f64 = da.iter().zip(db).map(|(a, b)| a * b).sum();
                out.push(FiberCorrelation {
                    first: fibers[i].clone(),
                    second: fibers[j].clone(),
                    coefficient: covariance / (sa * sb).sqrt(),
                });
            }
        }
        out
    }
}
