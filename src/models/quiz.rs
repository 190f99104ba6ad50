use serde::{Deserialize, Serialize};

use super::{Identified, Validate, blank};

pub const MAX_QUESTIONS_PER_QUIZ: usize = 3;
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Index into `options`.
    #[serde(alias = "correctAnswer")]
    pub correct_option: usize,
}

impl Identified for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct_option: usize,
}

impl Validate for QuestionDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.question) {
            missing.push("question");
        }
        if self.options.iter().any(|o| blank(o)) {
            missing.push("options");
        }
        if self.correct_option >= OPTIONS_PER_QUESTION {
            missing.push("correctOption");
        }
        missing
    }
}

/// Quiz attached to one chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "chapitre")]
    pub chapter: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn is_full(&self) -> bool {
        self.questions.len() >= MAX_QUESTIONS_PER_QUIZ
    }
}

impl Identified for Quiz {
    fn id(&self) -> &str {
        &self.id
    }
}
