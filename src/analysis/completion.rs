use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::ProjectYarnRecord;

/// Parses the date part of a project timestamp.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`, with or without a trailing time.
#[must_use]
pub fn parse_project_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y/%m/%d"))
        .ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionStats {
    pub count: usize,
    pub mean_days: f64,
    pub median_days: f64,
    pub min_days: i64,
    pub max_days: i64,
}

/// Days from start to completion, positive durations only.
pub fn completion_days<'a>(records: impl IntoIterator<Item = &'a ProjectYarnRecord>) -> Vec<i64> {
    records
        .into_iter()
        .filter_map(|r| {
            let started = parse_project_date(r.started.as_deref()?)?;
            let completed = parse_project_date(r.completed.as_deref()?)?;
            let days = (completed - started).num_days();
            (days > 0).then_some(days)
        })
        .collect()
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn completion_stats(days: &[i64]) -> Option<CompletionStats> {
    let mut sorted = days.to_vec();
    sorted.sort_unstable();

    let (&min_days, &max_days) = (sorted.first()?, sorted.last()?);
    let count = sorted.len();
    let mean_days = sorted.iter().sum::<i64>() as f64 / count as f64;
    let mid = count / 2;
    let median_days = if count % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    Some(CompletionStats {
        count,
        mean_days,
        median_days,
        min_days,
        max_days,
    })
}

/// Project starts per `YYYY-MM`, most recent `months` first.
pub fn monthly_starts<'a>(
    records: impl IntoIterator<Item = &'a ProjectYarnRecord>,
    months: usize,
) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(started) = record.started.as_deref().and_then(parse_project_date) {
            let key = format!("{:04}-{:02}", started.year(), started.month());
            *counts.entry(key).or_default() += 1;
        }
    }

    counts.into_iter().rev().take(months).collect()
}
