use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::reference::person_name;
use super::{
    CourseSummary, Identified, PersonSummary, Reference, Resource, ResourceKind, Searchable,
    Validate, blank,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "etudiant")]
    pub student: Reference<PersonSummary>,
    #[serde(alias = "cours")]
    pub course: Option<Reference<CourseSummary>>,
    #[serde(deserialize_with = "dates::day")]
    pub date: NaiveDate,
    #[serde(default, alias = "justifiee")]
    pub justified: bool,
    #[serde(default)]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAbsence {
    pub student: String,
    pub course: String,
    pub date: NaiveDate,
    pub justified: bool,
    pub justification: Option<String>,
}

impl Default for NewAbsence {
    fn default() -> Self {
        Self {
            student: String::new(),
            course: String::new(),
            date: chrono::Local::now().date_naive(),
            justified: false,
            justification: None,
        }
    }
}

impl Absence {
    pub fn subject_name(&self) -> Option<&str> {
        self.course
            .as_ref()
            .and_then(|c| c.get())
            .and_then(CourseSummary::subject_name)
    }

    pub fn course_name(&self) -> Option<&str> {
        self.course
            .as_ref()
            .and_then(|c| c.get())
            .map(|c| c.name.as_str())
    }
}

impl Identified for Absence {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Absence {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(self.student.id()) {
            missing.push("student");
        }
        if self.justified && self.justification.as_deref().is_none_or(blank) {
            missing.push("justification");
        }
        missing
    }
}

impl Validate for NewAbsence {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.student) {
            missing.push("student");
        }
        if blank(&self.course) {
            missing.push("course");
        }
        missing
    }
}

impl Resource for Absence {
    type Draft = NewAbsence;

    const KIND: ResourceKind = ResourceKind::Absences;

    fn from_draft(id: String, draft: &NewAbsence) -> Self {
        Absence {
            id,
            student: Reference::from(draft.student.as_str()),
            course: Some(Reference::from(draft.course.as_str())),
            date: draft.date,
            justified: draft.justified,
            justification: draft.justification.clone(),
        }
    }
}

impl Searchable for Absence {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = Vec::new();
        if let Some(course) = self.course_name() {
            fields.push(Cow::Borrowed(course));
        }
        if let Some(student) = person_name(&self.student) {
            fields.push(Cow::Owned(student));
        }
        if let Some(justification) = &self.justification {
            fields.push(Cow::Borrowed(justification.as_str()));
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "justified" => Some(self.justified.to_string()),
            "course" => self.course.as_ref().map(|c| c.id().to_string()),
            _ => None,
        }
    }
}
