use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::person_name;
use super::{
    CourseSummary, Identified, PersonSummary, Reference, Resource, ResourceKind, Searchable,
    Subject, Validate, blank,
};

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 20.0;

/// A grade on the 0-20 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "etudiant")]
    pub student: Reference<PersonSummary>,
    #[serde(alias = "cours")]
    pub course: Option<Reference<CourseSummary>>,
    #[serde(default, alias = "matiere")]
    pub subject: Option<Reference<Subject>>,
    #[serde(default, alias = "intitule")]
    pub assignment: String,
    #[serde(alias = "note")]
    pub value: f64,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub student: String,
    pub course: String,
    pub assignment: String,
    pub value: f64,
}

impl Note {
    /// Subject name from the note itself, else from its populated course.
    pub fn subject_name(&self) -> Option<&str> {
        self.subject
            .as_ref()
            .and_then(|s| s.get())
            .map(|s| s.name.as_str())
            .or_else(|| {
                self.course
                    .as_ref()
                    .and_then(|c| c.get())
                    .and_then(CourseSummary::subject_name)
            })
    }
}

fn grade_out_of_range(value: f64) -> bool {
    !(MIN_GRADE..=MAX_GRADE).contains(&value)
}

impl Identified for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Note {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(self.student.id()) {
            missing.push("student");
        }
        if grade_out_of_range(self.value) {
            missing.push("value");
        }
        missing
    }
}

impl Validate for NewNote {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.student) {
            missing.push("student");
        }
        if blank(&self.course) {
            missing.push("course");
        }
        if grade_out_of_range(self.value) {
            missing.push("value");
        }
        missing
    }
}

impl Resource for Note {
    type Draft = NewNote;

    const KIND: ResourceKind = ResourceKind::Notes;

    fn from_draft(id: String, draft: &NewNote) -> Self {
        Note {
            id,
            student: Reference::from(draft.student.as_str()),
            course: Some(Reference::from(draft.course.as_str())),
            subject: None,
            assignment: draft.assignment.clone(),
            value: draft.value,
            created_at: Utc::now(),
        }
    }
}

impl Searchable for Note {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.assignment.as_str())];
        if let Some(subject) = self.subject_name() {
            fields.push(Cow::Borrowed(subject));
        }
        if let Some(student) = person_name(&self.student) {
            fields.push(Cow::Owned(student));
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "subject" => self.subject_name().map(str::to_string),
            "student" => Some(self.student.id().to_string()),
            _ => None,
        }
    }
}
