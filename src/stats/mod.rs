//! Client side aggregation of grades, absences and reminders.

pub mod absences;
pub mod band;
pub mod grades;
pub mod reminders;

pub use absences::{AbsenceSummary, summarize_absences};
pub use band::Band;
pub use grades::{
    DEFAULT_TREND_WINDOW, GradeReport, GroupStats, Measured, Trend, aggregate_grades,
    compute_trend,
};
pub use reminders::{DUE_SOON_DAYS, ReminderSummary, summarize_reminders};

/// Label used when a record carries no subject.
pub const UNSPECIFIED_SUBJECT: &str = "Non spécifié";

/// Rounds to two decimals, the precision averages are displayed with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
