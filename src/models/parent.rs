use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{
    Identified, PersonSummary, Reference, Resource, ResourceKind, Searchable, Validate, blank,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl ParentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ParentStatus::Active => "active",
            ParentStatus::Inactive => "inactive",
            ParentStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "prenom")]
    pub first_name: String,
    #[serde(alias = "nom")]
    pub last_name: String,
    pub email: String,
    #[serde(default, alias = "telephone")]
    pub phone: Option<String>,
    #[serde(default, alias = "adresse")]
    pub address: Option<String>,
    #[serde(default, alias = "enfants")]
    pub children: Vec<Reference<PersonSummary>>,
    #[serde(default)]
    pub status: ParentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub children: Vec<String>,
    pub status: ParentStatus,
    /// Initial password, only sent on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Parent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

fn email_invalid(email: &str) -> bool {
    let email = email.trim();
    email.is_empty() || !email.contains('@')
}

impl Identified for Parent {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Parent {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.first_name) {
            missing.push("firstName");
        }
        if blank(&self.last_name) {
            missing.push("lastName");
        }
        if email_invalid(&self.email) {
            missing.push("email");
        }
        missing
    }
}

impl Validate for NewParent {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.first_name) {
            missing.push("firstName");
        }
        if blank(&self.last_name) {
            missing.push("lastName");
        }
        if email_invalid(&self.email) {
            missing.push("email");
        }
        missing
    }
}

impl Resource for Parent {
    type Draft = NewParent;

    const KIND: ResourceKind = ResourceKind::Parents;

    fn from_draft(id: String, draft: &NewParent) -> Self {
        Parent {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            address: draft.address.clone(),
            children: draft.children.iter().map(|c| Reference::from(c.as_str())).collect(),
            status: draft.status,
        }
    }
}

impl Searchable for Parent {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Owned(self.full_name()),
            Cow::Borrowed(self.email.as_str()),
        ];
        if let Some(phone) = &self.phone {
            fields.push(Cow::Borrowed(phone.as_str()));
        }
        for child in self.children.iter().filter_map(|c| c.get()) {
            fields.push(Cow::Owned(child.full_name()));
        }
        fields
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }
}
