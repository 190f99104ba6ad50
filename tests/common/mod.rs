#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use learnup::models::{
    Course, CourseStatus, CourseSummary, Note, Parent, ParentStatus, PersonSummary, Reference,
    Subject,
};

pub fn subject(id: &str, name: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn person(id: &str, first: &str, last: &str) -> PersonSummary {
    PersonSummary {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        class_label: None,
    }
}

pub fn course(
    id: &str,
    name: &str,
    class_label: &str,
    subject_name: &str,
    status: CourseStatus,
) -> Course {
    Course {
        id: id.to_string(),
        name: name.to_string(),
        subject: Some(Reference::Populated(subject(
            &format!("s-{}", subject_name.to_lowercase()),
            subject_name,
        ))),
        teacher: Some(Reference::Populated(person("t1", "Marie", "Curie"))),
        class_label: class_label.to_string(),
        semester: "S1".to_string(),
        schedule: "08:00".to_string(),
        room: Some("B12".to_string()),
        duration: Some(60),
        status,
        students: Vec::new(),
        chapters: Vec::new(),
        homework: Vec::new(),
    }
}

pub fn sample_courses() -> Vec<Course> {
    vec![
        course("c1", "Algèbre", "3A", "Maths", CourseStatus::Active),
        course("c2", "Géométrie", "3B", "Maths", CourseStatus::Inactive),
        course("c3", "Mécanique", "3A", "Physique", CourseStatus::Active),
        course("c4", "Poésie", "4A", "Français", CourseStatus::Draft),
    ]
}

pub fn parent(id: &str, first: &str, last: &str, status: ParentStatus) -> Parent {
    Parent {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: None,
        address: None,
        children: Vec::new(),
        status,
    }
}

/// Grade for `subject_name` recorded on day `day` of January 2025.
pub fn note(id: &str, subject_name: Option<&str>, value: f64, day: u32) -> Note {
    Note {
        id: id.to_string(),
        student: Reference::Id("st1".to_string()),
        course: Some(Reference::Populated(CourseSummary {
            id: format!("course-{}", id),
            name: "Cours".to_string(),
            subject: subject_name.map(|n| Reference::Populated(subject("m", n))),
        })),
        subject: None,
        assignment: format!("Devoir {}", id),
        value,
        created_at: Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
