use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::band::Band;
use super::{UNSPECIFIED_SUBJECT, mean, round2};
use crate::models::Note;

pub const DEFAULT_TREND_WINDOW: usize = 3;

/// A dated numeric record that can be grouped.
pub trait Measured {
    fn group_key(&self) -> Option<&str>;
    fn value(&self) -> f64;
    fn recorded_at(&self) -> DateTime<Utc>;
}

impl Measured for Note {
    fn group_key(&self) -> Option<&str> {
        self.subject_name()
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub count: usize,
    /// Mean rounded to two decimals.
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub trend: Trend,
    /// Recent window mean minus preceding window mean, two decimals.
    pub trend_delta: f64,
    pub band: Band,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub overall: Option<GroupStats>,
    pub by_subject: BTreeMap<String, GroupStats>,
}

/// Compares the mean of the last `window` values against the `window`
/// values before them. `values` must be ordered oldest first.
pub fn compute_trend(values: &[f64], window: usize) -> (Trend, f64) {
    let window = window.max(1);
    let split = values.len().saturating_sub(window);
    let recent = &values[split..];
    let previous = &values[split.saturating_sub(window)..split];

    let (Some(recent_mean), Some(previous_mean)) = (mean(recent), mean(previous)) else {
        return (Trend::Stable, 0.0);
    };

    let delta = round2(recent_mean - previous_mean);
    let trend = if delta > 0.0 {
        Trend::Improving
    } else if delta < 0.0 {
        Trend::Declining
    } else {
        Trend::Stable
    };
    (trend, delta)
}

fn group_stats(values: &[f64], window: usize) -> Option<GroupStats> {
    let average = round2(mean(values)?);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let (trend, trend_delta) = compute_trend(values, window);
    Some(GroupStats {
        count: values.len(),
        average,
        max,
        min,
        trend,
        trend_delta,
        band: Band::from_average(average),
    })
}

/// Groups records by subject and computes count, mean, extremes, trend and
/// band for every subject and overall. Output does not depend on input order
/// beyond timestamp ties.
pub fn aggregate_grades<T: Measured>(records: &[T], window: usize) -> GradeReport {
    let mut ordered: Vec<&T> = records.iter().collect();
    ordered.sort_by_key(|r| r.recorded_at());

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in &ordered {
        let key = record
            .group_key()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(UNSPECIFIED_SUBJECT);
        groups.entry(key.to_string()).or_default().push(record.value());
    }

    let all: Vec<f64> = ordered.iter().map(|r| r.value()).collect();

    GradeReport {
        overall: group_stats(&all, window),
        by_subject: groups
            .into_iter()
            .filter_map(|(subject, values)| group_stats(&values, window).map(|s| (subject, s)))
            .collect(),
    }
}
