use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{Priority, Rappel};

/// Length of the "due soon" window in calendar days, today being the first.
pub const DUE_SOON_DAYS: u64 = 7;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReminderSummary {
    pub total: usize,
    pub active: usize,
    pub done: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub by_priority: BTreeMap<Priority, usize>,
}

pub fn summarize_reminders(reminders: &[Rappel], today: NaiveDate) -> ReminderSummary {
    // Last day of the window, inclusive.
    let horizon = today
        .checked_add_days(Days::new(DUE_SOON_DAYS - 1))
        .unwrap_or(NaiveDate::MAX);

    let mut summary = ReminderSummary {
        total: reminders.len(),
        by_priority: Priority::ALL.iter().map(|p| (*p, 0)).collect(),
        ..ReminderSummary::default()
    };

    for reminder in reminders {
        *summary.by_priority.entry(reminder.priority).or_default() += 1;
        if reminder.is_done() {
            summary.done += 1;
            continue;
        }
        summary.active += 1;
        if reminder.due_date < today {
            summary.overdue += 1;
        } else if reminder.due_date <= horizon {
            summary.due_soon += 1;
        }
    }
    summary
}
