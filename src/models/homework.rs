use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates;
use super::{Identified, Validate, blank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "titre")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "dateLimite", deserialize_with = "dates::optional_day")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, alias = "fichier")]
    pub file_url: Option<String>,
}

impl Identified for Homework {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Multipart form content for a homework upload.
#[derive(Debug, Clone, Default)]
pub struct HomeworkUpload {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Validate for HomeworkUpload {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.title) {
            missing.push("title");
        }
        if blank(&self.file_name) || self.bytes.is_empty() {
            missing.push("file");
        }
        missing
    }
}
