use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::reference::person_name;
use super::{
    Identified, PersonSummary, Reference, Resource, ResourceKind, Searchable, Validate, blank,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    #[default]
    Active,
    Done,
}

impl ReminderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderStatus::Active => "active",
            ReminderStatus::Done => "done",
        }
    }
}

/// Parent reminder ("rappel").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rappel {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "titre")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "dateEcheance", deserialize_with = "dates::day")]
    pub due_date: NaiveDate,
    #[serde(default, alias = "priorite")]
    pub priority: Priority,
    #[serde(default, alias = "statut")]
    pub status: ReminderStatus,
    #[serde(default, alias = "enfant")]
    pub child: Option<Reference<PersonSummary>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRappel {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: ReminderStatus,
    pub child: Option<String>,
}

impl Default for NewRappel {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: chrono::Local::now().date_naive(),
            priority: Priority::Medium,
            status: ReminderStatus::Active,
            child: None,
        }
    }
}

impl Rappel {
    pub fn is_done(&self) -> bool {
        self.status == ReminderStatus::Done
    }
}

impl Identified for Rappel {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Rappel {
    fn missing_fields(&self) -> Vec<&'static str> {
        if blank(&self.title) {
            vec!["title"]
        } else {
            Vec::new()
        }
    }
}

impl Validate for NewRappel {
    fn missing_fields(&self) -> Vec<&'static str> {
        if blank(&self.title) {
            vec!["title"]
        } else {
            Vec::new()
        }
    }
}

impl Resource for Rappel {
    type Draft = NewRappel;

    const KIND: ResourceKind = ResourceKind::Rappels;

    fn from_draft(id: String, draft: &NewRappel) -> Self {
        Rappel {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            child: draft.child.as_deref().map(Reference::from),
        }
    }
}

impl Searchable for Rappel {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ];
        if let Some(child) = self.child.as_ref().and_then(person_name) {
            fields.push(Cow::Owned(child));
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "priority" => Some(self.priority.as_str().to_string()),
            "status" => Some(self.status.as_str().to_string()),
            "child" => self.child.as_ref().map(|c| c.id().to_string()),
            _ => None,
        }
    }
}
