use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::reference::person_name;
use super::{
    CourseSummary, Identified, PersonSummary, Reference, Resource, ResourceKind, Searchable,
    Validate, blank,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeanceStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl SeanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SeanceStatus::Scheduled => "scheduled",
            SeanceStatus::Completed => "completed",
            SeanceStatus::Cancelled => "cancelled",
        }
    }
}

/// One scheduled session of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seance {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(deserialize_with = "dates::day")]
    pub date: NaiveDate,
    #[serde(alias = "heureDebut")]
    pub start_time: String,
    #[serde(alias = "heureFin")]
    pub end_time: String,
    #[serde(alias = "cours")]
    pub course: Option<Reference<CourseSummary>>,
    #[serde(alias = "professeur")]
    pub teacher: Option<Reference<PersonSummary>>,
    #[serde(default, alias = "classe")]
    pub class_label: String,
    #[serde(default, alias = "salle")]
    pub room: Option<String>,
    #[serde(default, alias = "groupe")]
    pub group: Option<String>,
    #[serde(default)]
    pub status: SeanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeance {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub course: String,
    pub teacher: String,
    pub class_label: String,
    pub room: Option<String>,
    pub group: Option<String>,
    pub status: SeanceStatus,
}

impl Default for NewSeance {
    fn default() -> Self {
        Self {
            date: chrono::Local::now().date_naive(),
            start_time: String::new(),
            end_time: String::new(),
            course: String::new(),
            teacher: String::new(),
            class_label: String::new(),
            room: None,
            group: None,
            status: SeanceStatus::Scheduled,
        }
    }
}

/// "HH:MM" strings compare correctly as text once both are well formed.
fn time_range_invalid(start: &str, end: &str) -> bool {
    let well_formed = |t: &str| chrono::NaiveTime::parse_from_str(t, "%H:%M").is_ok();
    well_formed(start) && well_formed(end) && end <= start
}

impl Identified for Seance {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Seance {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.start_time) {
            missing.push("startTime");
        }
        if blank(&self.end_time) || time_range_invalid(&self.start_time, &self.end_time) {
            missing.push("endTime");
        }
        if blank(&self.class_label) {
            missing.push("classLabel");
        }
        missing
    }
}

impl Validate for NewSeance {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.start_time) {
            missing.push("startTime");
        }
        if blank(&self.end_time) || time_range_invalid(&self.start_time, &self.end_time) {
            missing.push("endTime");
        }
        if blank(&self.course) {
            missing.push("course");
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

impl Resource for Seance {
    type Draft = NewSeance;

    const KIND: ResourceKind = ResourceKind::Seances;

    fn from_draft(id: String, draft: &NewSeance) -> Self {
        Seance {
            id,
            date: draft.date,
            start_time: draft.start_time.clone(),
            end_time: draft.end_time.clone(),
            course: Some(Reference::Id(draft.course.clone())),
            teacher: Some(Reference::Id(draft.teacher.clone())),
            class_label: draft.class_label.clone(),
            room: draft.room.clone(),
            group: draft.group.clone(),
            status: draft.status,
        }
    }
}

impl Searchable for Seance {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.class_label.as_str())];
        if let Some(course) = self.course.as_ref().and_then(|c| c.get()) {
            fields.push(Cow::Borrowed(course.name.as_str()));
        }
        if let Some(teacher) = self.teacher.as_ref().and_then(person_name) {
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
            "teacher" => self.teacher.as_ref().map(|t| t.id().to_string()),
            "date" => Some(self.date.format("%Y-%m-%d").to_string()),
            _ => None,
        }
    }
}
