use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::reference::person_name;
use super::{
    Identified, PersonSummary, Reference, Resource, ResourceKind, Searchable, Subject, Validate,
    blank,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Active,
    Inactive,
    Draft,
}

impl CourseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseStatus::Active => "active",
            CourseStatus::Inactive => "inactive",
            CourseStatus::Draft => "draft",
        }
    }
}

/// Chapter as embedded in a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "titre")]
    pub title: String,
}

impl Identified for Chapter {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "nom")]
    pub name: String,
    #[serde(alias = "matiere")]
    pub subject: Option<Reference<Subject>>,
    #[serde(alias = "professeur")]
    pub teacher: Option<Reference<PersonSummary>>,
    #[serde(default, alias = "classe")]
    pub class_label: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default, alias = "horaire")]
    pub schedule: String,
    #[serde(default, alias = "salle")]
    pub room: Option<String>,
    /// Minutes.
    #[serde(default, alias = "duree")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default, alias = "etudiants")]
    pub students: Vec<Reference<PersonSummary>>,
    #[serde(default, alias = "chapitres")]
    pub chapters: Vec<Reference<Chapter>>,
    #[serde(default, alias = "devoirs")]
    pub homework: Vec<Reference<super::Homework>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub subject: String,
    pub teacher: String,
    pub class_label: String,
    pub semester: String,
    pub schedule: String,
    pub room: Option<String>,
    pub duration: Option<u32>,
    pub status: CourseStatus,
}

impl Course {
    pub fn subject_name(&self) -> Option<&str> {
        self.subject
            .as_ref()
            .and_then(|s| s.get())
            .map(|s| s.name.as_str())
    }

    pub fn teacher_name(&self) -> Option<String> {
        self.teacher.as_ref().and_then(person_name)
    }
}

impl Identified for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Course {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if blank(&self.class_label) {
            missing.push("classLabel");
        }
        missing
    }
}

impl Validate for NewCourse {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("name");
        }
        if blank(&self.subject) {
            missing.push("subject");
        }
        if blank(&self.teacher) {
            missing.push("teacher");
        }
        if blank(&self.class_label) {
            missing.push("classLabel");
        }
        missing
    }
}

impl Resource for Course {
    type Draft = NewCourse;

    const KIND: ResourceKind = ResourceKind::Courses;

    fn from_draft(id: String, draft: &NewCourse) -> Self {
        Course {
            id,
            name: draft.name.clone(),
            subject: Some(Reference::Id(draft.subject.clone())),
            teacher: Some(Reference::Id(draft.teacher.clone())),
            class_label: draft.class_label.clone(),
            semester: draft.semester.clone(),
            schedule: draft.schedule.clone(),
            room: draft.room.clone(),
            duration: draft.duration,
            status: draft.status,
            students: Vec::new(),
            chapters: Vec::new(),
            homework: Vec::new(),
        }
    }
}

impl Searchable for Course {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.class_label.as_str()),
        ];
        if let Some(subject) = self.subject_name() {
            fields.push(Cow::Borrowed(subject));
        }
        if let Some(teacher) = self.teacher_name() {
            fields.push(Cow::Owned(teacher));
        }
        if let Some(room) = &self.room {
            fields.push(Cow::Borrowed(room.as_str()));
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            "class" => Some(self.class_label.clone()),
            "semester" => Some(self.semester.clone()),
            "subject" => self.subject.as_ref().map(|s| s.id().to_string()),
            "teacher" => self.teacher.as_ref().map(|t| t.id().to_string()),
            _ => None,
        }
    }
}
