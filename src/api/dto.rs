use serde::{Deserialize, Serialize};

use crate::models::QuestionDraft;

/// The backend returns either the bare value or wraps it under `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(value) => value,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest<'a> {
    pub question: &'a str,
    pub options: &'a [String],
    pub correct_option: usize,
}

impl<'a> From<&'a QuestionDraft> for AddQuestionRequest<'a> {
    fn from(draft: &'a QuestionDraft) -> Self {
        Self {
            question: &draft.question,
            options: &draft.options,
            correct_option: draft.correct_option,
        }
    }
}
