use std::collections::{BTreeMap, BTreeSet};

use crate::models::{PatternYarnGroup, YarnCatalogEntry};

/// Distinct yarns with a known id, sorted by id, each given a dense index.
///
/// The first name and permalink seen for an id win.
#[must_use]
pub fn build_catalog(groups: &[PatternYarnGroup]) -> Vec<YarnCatalogEntry> {
    let mut seen: BTreeMap<i64, (String, Option<String>)> = BTreeMap::new();

    for usage in groups
        .iter()
        .flat_map(|g| g.entries.iter())
        .flat_map(|r| r.yarn_data.iter())
    {
        if let Some(yarn_id) = usage.yarn_id {
            seen.entry(yarn_id).or_insert_with(|| {
                (
                    usage.yarn_name.clone().unwrap_or_default(),
                    usage.yarn_permalink.clone(),
                )
            });
        }
    }

    seen.into_iter()
        .enumerate()
        .map(|(matrix_index, (yarn_id, (yarn_name, yarn_permalink)))| YarnCatalogEntry {
            matrix_index,
            yarn_id,
            yarn_name,
            yarn_permalink,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnPair {
    pub first: i64,
    pub second: i64,
    /// Number of pattern groups in which both yarns were used.
    pub patterns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YarnCoUsage {
    /// Projects using each yarn.
    pub usage: BTreeMap<i64, usize>,
    /// Keyed by `(smaller id, larger id)`.
    pub pairs: BTreeMap<(i64, i64), usize>,
}

impl YarnCoUsage {
    /// Counts, per pattern group, every pair of distinct yarns used across
    /// that group's projects.
    #[must_use]
    pub fn from_groups(groups: &[PatternYarnGroup]) -> Self {
        let mut co = Self::default();

        for group in groups {
            let mut in_group: BTreeSet<i64> = BTreeSet::new();

            for record in &group.entries {
                let per_project: BTreeSet<i64> =
                    record.yarn_data.iter().filter_map(|u| u.yarn_id).collect();
                for id in &per_project {
                    *co.usage.entry(*id).or_default() += 1;
                }
                in_group.extend(per_project);
            }

            let ids: Vec<i64> = in_group.into_iter().collect();
            for (i, a) in ids.iter().enumerate() {
                for b in &ids[i + 1..] {
                    *co.pairs.entry((*a, *b)).or_default() += 1;
                }
            }
        }

        co
    }

    /// Most frequent pairs; ties broken by ids ascending.
    #[must_use]
    pub fn top_pairs(&self, n: usize) -> Vec<YarnPair> {
        let mut pairs: Vec<YarnPair> = self
            .pairs
            .iter()
            .map(|(&(first, second), &patterns)| YarnPair {
                first,
                second,
                patterns,
            })
            .collect();
        pairs.sort_by(|a, b| b.patterns.cmp(&a.patterns));
        pairs.truncate(n);
        pairs
    }

    #[must_use]
    pub fn top_yarns(&self, n: usize) -> Vec<(i64, usize)> {
        super::rank(self.usage.clone(), n)
    }
}
