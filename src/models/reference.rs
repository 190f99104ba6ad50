use serde::{Deserialize, Serialize, Serializer};

use super::Identified;

/// A foreign key the backend may or may not have populated.
///
/// Always serializes as the bare id so a record can be PUT back unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Populated(T),
    Id(String),
}

impl<T: Identified> Reference<T> {
    pub fn id(&self) -> &str {
        match self {
            Reference::Populated(item) => item.id(),
            Reference::Id(id) => id,
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Reference::Populated(item) => Some(item),
            Reference::Id(_) => None,
        }
    }
}

impl<T> From<String> for Reference<T> {
    fn from(id: String) -> Self {
        Reference::Id(id)
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(id: &str) -> Self {
        Reference::Id(id.to_string())
    }
}

impl<T: Identified> Serialize for Reference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Subject ("matière").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "nom")]
    pub name: String,
}

impl Identified for Subject {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Teacher or student as embedded in other records and dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "prenom")]
    pub first_name: String,
    #[serde(default, alias = "nom")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "classe")]
    pub class_label: Option<String>,
}

impl PersonSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Identified for PersonSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "nom")]
    pub name: String,
    #[serde(default, alias = "matiere")]
    pub subject: Option<Reference<Subject>>,
}

impl CourseSummary {
    pub fn subject_name(&self) -> Option<&str> {
        self.subject
            .as_ref()
            .and_then(|s| s.get())
            .map(|s| s.name.as_str())
    }
}

impl Identified for CourseSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Name of a populated person reference.
pub(crate) fn person_name(reference: &Reference<PersonSummary>) -> Option<String> {
    reference.get().map(PersonSummary::full_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_id_or_populated_object() {
        let bare: Reference<Subject> = serde_json::from_str("\"m1\"").expect("bare id");
        assert_eq!(bare.id(), "m1");
        assert!(bare.get().is_none());

        let populated: Reference<Subject> =
            serde_json::from_str(r#"{"_id":"m2","nom":"Maths"}"#).expect("populated");
        assert_eq!(populated.id(), "m2");
        assert_eq!(populated.get().map(|s| s.name.as_str()), Some("Maths"));
    }

    #[test]
    fn serializes_as_id() {
        let populated = Reference::Populated(Subject {
            id: "m2".to_string(),
            name: "Maths".to_string(),
        });
        assert_eq!(serde_json::to_string(&populated).unwrap(), "\"m2\"");
    }
}
