use std::collections::BTreeMap;

use serde::Serialize;

use super::{UNSPECIFIED_SUBJECT, round2};
use crate::models::Absence;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AbsenceSummary {
    pub total: usize,
    pub justified: usize,
    pub unjustified: usize,
    /// Share of justified absences in percent, two decimals.
    pub justification_rate: f64,
    pub by_subject: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM`.
    pub by_month: BTreeMap<String, usize>,
}

pub fn summarize_absences(absences: &[Absence]) -> AbsenceSummary {
    let mut summary = AbsenceSummary {
        total: absences.len(),
        ..AbsenceSummary::default()
    };

    for absence in absences {
        if absence.justified {
            summary.justified += 1;
        } else {
            summary.unjustified += 1;
        }
        let subject = absence
            .subject_name()
            .or_else(|| absence.course_name())
            .unwrap_or(UNSPECIFIED_SUBJECT);
        *summary.by_subject.entry(subject.to_string()).or_default() += 1;
        *summary
            .by_month
            .entry(absence.date.format("%Y-%m").to_string())
            .or_default() += 1;
    }

    if summary.total > 0 {
        summary.justification_rate =
            round2(summary.justified as f64 * 100.0 / summary.total as f64);
    }
    summary
}
