mod common;

use learnup::models::{Absence, CourseSummary, Priority, Rappel, Reference, ReminderStatus};
use learnup::stats::{
    Band, Trend, UNSPECIFIED_SUBJECT, aggregate_grades, compute_trend, summarize_absences,
    summarize_reminders,
};

use common::{date, note, subject};

#[test]
fn maths_example_scenario() {
    let notes = vec![
        note("n1", Some("Maths"), 18.0, 1),
        note("n2", Some("Maths"), 14.0, 2),
        note("n3", Some("Maths"), 9.0, 3),
    ];

    let report = aggregate_grades(&notes, 3);
    let maths = &report.by_subject["Maths"];

    assert_eq!(maths.count, 3);
    assert_eq!(maths.average, 13.67);
    assert_eq!(maths.max, 18.0);
    assert_eq!(maths.min, 9.0);
    assert_eq!(maths.band, Band::Good);
    assert_eq!(maths.band.label(), "Bien");
}

#[test]
fn missing_subject_falls_back_to_unspecified() {
    let notes = vec![note("n1", None, 12.0, 1), note("n2", Some("  "), 8.0, 2)];

    let report = aggregate_grades(&notes, 3);

    assert_eq!(report.by_subject.len(), 1);
    assert_eq!(report.by_subject[UNSPECIFIED_SUBJECT].count, 2);
    assert_eq!(report.by_subject[UNSPECIFIED_SUBJECT].average, 10.0);
}

#[test]
fn aggregation_is_order_independent_and_repeatable() {
    let notes = vec![
        note("a", Some("Maths"), 12.5, 4),
        note("b", Some("Physique"), 15.0, 2),
        note("c", Some("Maths"), 7.25, 1),
        note("d", Some("Physique"), 11.0, 5),
        note("e", Some("Maths"), 16.0, 3),
    ];
    let mut reversed = notes.clone();
    reversed.reverse();

    let first = aggregate_grades(&notes, 3);
    let again = aggregate_grades(&notes, 3);
    let shuffled = aggregate_grades(&reversed, 3);

    assert_eq!(first, again);
    assert_eq!(first, shuffled);
    assert_eq!(first.overall.as_ref().unwrap().count, 5);
}

#[test]
fn trend_compares_recent_window_with_previous_one() {
    assert_eq!(compute_trend(&[8.0, 9.0, 10.0, 14.0, 15.0, 16.0], 3), (Trend::Improving, 6.0));
    assert_eq!(compute_trend(&[16.0, 15.0, 14.0, 10.0, 9.0, 8.0], 3), (Trend::Declining, -6.0));
    assert_eq!(compute_trend(&[12.0, 12.0], 1), (Trend::Stable, 0.0));
}

#[test]
fn trend_without_previous_window_is_stable() {
    assert_eq!(compute_trend(&[], 3), (Trend::Stable, 0.0));
    assert_eq!(compute_trend(&[10.0, 20.0], 3), (Trend::Stable, 0.0));
}

#[test]
fn trend_uses_partial_previous_window() {
    // Recent [14, 15, 16] against the only earlier value [10].
    let (trend, delta) = compute_trend(&[10.0, 14.0, 15.0, 16.0], 3);
    assert_eq!(trend, Trend::Improving);
    assert_eq!(delta, 5.0);
}

#[test]
fn trend_follows_timestamps_not_input_order() {
    let notes = vec![
        note("late", Some("Maths"), 18.0, 20),
        note("early", Some("Maths"), 6.0, 1),
    ];
    let report = aggregate_grades(&notes, 1);
    assert_eq!(report.by_subject["Maths"].trend, Trend::Improving);
}

fn absence(id: &str, subject_name: Option<&str>, justified: bool, month: u32) -> Absence {
    Absence {
        id: id.to_string(),
        student: Reference::Id("st1".to_string()),
        course: Some(Reference::Populated(CourseSummary {
            id: "c1".to_string(),
            name: "Cours".to_string(),
            subject: subject_name.map(|n| Reference::Populated(subject("m", n))),
        })),
        date: date(2025, month, 10),
        justified,
        justification: justified.then(|| "Certificat médical".to_string()),
    }
}

#[test]
fn absence_summary_counts_and_rate() {
    let absences = vec![
        absence("a1", Some("Maths"), true, 1),
        absence("a2", Some("Maths"), false, 1),
        absence("a3", Some("Histoire"), false, 2),
    ];

    let summary = summarize_absences(&absences);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.justified, 1);
    assert_eq!(summary.unjustified, 2);
    assert_eq!(summary.justification_rate, 33.33);
    assert_eq!(summary.by_subject["Maths"], 2);
    assert_eq!(summary.by_month["2025-01"], 2);
    assert_eq!(summary.by_month["2025-02"], 1);
}

#[test]
fn empty_absence_list_has_zero_rate() {
    let summary = summarize_absences(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.justification_rate, 0.0);
}

fn rappel(id: &str, due: (i32, u32, u32), priority: Priority, status: ReminderStatus) -> Rappel {
    Rappel {
        id: id.to_string(),
        title: format!("Rappel {}", id),
        description: String::new(),
        due_date: date(due.0, due.1, due.2),
        priority,
        status,
        child: None,
    }
}

#[test]
fn reminder_summary_buckets() {
    let today = date(2025, 3, 10);
    let reminders = vec![
        rappel("r1", (2025, 3, 1), Priority::Urgent, ReminderStatus::Active),
        rappel("r2", (2025, 3, 10), Priority::High, ReminderStatus::Active),
        rappel("r3", (2025, 3, 16), Priority::Low, ReminderStatus::Active),
        rappel("r4", (2025, 3, 17), Priority::Low, ReminderStatus::Active),
        rappel("r5", (2025, 2, 1), Priority::Medium, ReminderStatus::Done),
    ];

    let summary = summarize_reminders(&reminders, today);

    assert_eq!(summary.total, 5);
    assert_eq!(summary.active, 4);
    assert_eq!(summary.done, 1);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.due_soon, 2);
    assert_eq!(summary.by_priority[&Priority::Low], 2);
    assert_eq!(summary.by_priority[&Priority::Medium], 1);
    assert_eq!(summary.by_priority[&Priority::Urgent], 1);
}

#[test]
fn due_soon_window_spans_seven_calendar_days() {
    let today = date(2025, 3, 10);
    let on = |day: u32| {
        let reminders = vec![rappel("r", (2025, 3, day), Priority::Medium, ReminderStatus::Active)];
        summarize_reminders(&reminders, today).due_soon
    };

    assert_eq!(on(10), 1);
    assert_eq!(on(16), 1);
    assert_eq!(on(17), 0);
    assert_eq!(on(9), 0);
}
