use tracing::info;

use crate::api::LearnUpHttpClient;
use crate::error::{AppError, Operation};
use crate::models::{MAX_QUESTIONS_PER_QUIZ, OPTIONS_PER_QUESTION, QuestionDraft, Quiz, Validate};

/// Professor side quiz authoring for one chapter.
#[derive(Debug, Clone)]
pub struct QuizEditor {
    chapter_id: String,
    quiz: Option<Quiz>,
    error: Option<String>,
}

impl QuizEditor {
    pub fn new(chapter_id: impl Into<String>) -> Self {
        Self {
            chapter_id: chapter_id.into(),
            quiz: None,
            error: None,
        }
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn question_count(&self) -> usize {
        self.quiz.as_ref().map_or(0, |q| q.questions.len())
    }

    pub fn can_add_question(&self) -> bool {
        self.question_count() < MAX_QUESTIONS_PER_QUIZ
    }

    pub async fn load(&mut self, api: &LearnUpHttpClient) -> Result<(), AppError> {
        match api.quiz(&self.chapter_id).await {
            Ok(quiz) => {
                self.quiz = quiz;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(Operation::Load));
                Err(e)
            }
        }
    }

    /// Rejected locally once the quiz holds the maximum number of questions.
    pub async fn add_question(
        &mut self,
        api: &LearnUpHttpClient,
        draft: &QuestionDraft,
    ) -> Result<(), AppError> {
        if !self.can_add_question() {
            let e = AppError::BadRequest(format!(
                "Un quiz ne peut pas contenir plus de {} questions",
                MAX_QUESTIONS_PER_QUIZ
            ));
            self.error = Some(e.user_message(Operation::Create));
            return Err(e);
        }
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            let e = AppError::BadRequest(format!(
                "Veuillez remplir les champs obligatoires: {}",
                missing.join(", ")
            ));
            self.error = Some(e.user_message(Operation::Create));
            return Err(e);
        }

        match api.add_question(&self.chapter_id, draft).await {
            Ok(quiz) => {
                info!(
                    "quiz for chapter {} now has {} question(s)",
                    self.chapter_id,
                    quiz.questions.len()
                );
                self.quiz = Some(quiz);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(Operation::Create));
                Err(e)
            }
        }
    }

    pub async fn remove_question(
        &mut self,
        api: &LearnUpHttpClient,
        question_id: &str,
    ) -> Result<(), AppError> {
        match api.delete_question(&self.chapter_id, question_id).await {
            Ok(()) => {
                if let Some(quiz) = &mut self.quiz {
                    quiz.questions.retain(|q| q.id != question_id);
                }
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.user_message(Operation::Delete));
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    /// Percentage, two decimals.
    pub percent: f64,
}

/// Student side play-through of a quiz.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    quiz: Quiz,
    answers: Vec<Option<usize>>,
}

impl QuizAttempt {
    pub fn new(quiz: Quiz) -> Self {
        let answers = vec![None; quiz.questions.len()];
        Self { quiz, answers }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answer(&mut self, question: usize, option: usize) -> Result<(), AppError> {
        if option >= OPTIONS_PER_QUESTION {
            return Err(AppError::BadRequest(format!("Option invalide: {}", option)));
        }
        let slot = self
            .answers
            .get_mut(question)
            .ok_or_else(|| AppError::BadRequest(format!("Question invalide: {}", question)))?;
        *slot = Some(option);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    pub fn score(&self) -> QuizScore {
        let total = self.quiz.questions.len();
        let correct = self
            .quiz
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_option))
            .count();
        let percent = if total == 0 {
            0.0
        } else {
            crate::stats::round2(correct as f64 * 100.0 / total as f64)
        };
        QuizScore {
            correct,
            total,
            percent,
        }
    }
}
