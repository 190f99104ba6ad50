pub mod absence;
pub mod course;
mod dates;
pub mod homework;
pub mod note;
pub mod parent;
pub mod quiz;
pub mod rappel;
pub mod reference;
pub mod seance;
pub mod user;

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use absence::{Absence, NewAbsence};
pub use course::{Course, CourseStatus, NewCourse};
pub use homework::{Homework, HomeworkUpload};
pub use note::{NewNote, Note};
pub use parent::{NewParent, Parent, ParentStatus};
pub use quiz::{MAX_QUESTIONS_PER_QUIZ, OPTIONS_PER_QUESTION, Question, QuestionDraft, Quiz};
pub use rappel::{NewRappel, Priority, Rappel, ReminderStatus};
pub use reference::{CourseSummary, PersonSummary, Reference, Subject};
pub use seance::{NewSeance, Seance, SeanceStatus};
pub use user::{LoginRequest, LoginResponse, Role, UserInfo, UserProfile};

/// Sentinel facet value meaning "no constraint".
pub const FILTER_ALL: &str = "all";

/// Collections that can be invalidated and refetched independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Courses,
    Seances,
    Parents,
    Notes,
    Absences,
    Rappels,
    Quizzes,
    Homework,
}

pub trait Identified {
    fn id(&self) -> &str;
}

/// A record kept in a canonical list and written through a backend.
pub trait Resource:
    Identified + Validate + Clone + fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    type Draft: Validate + Clone + Default + fmt::Debug + Send + Sync + Serialize + 'static;

    const KIND: ResourceKind;

    /// Builds the record a fixture backend stores for `draft`.
    fn from_draft(id: String, draft: &Self::Draft) -> Self;
}

/// Free-text fields and dropdown facets used by list filtering.
pub trait Searchable {
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// Value of the named facet, `None` when the record has no value for it.
    fn facet(&self, name: &str) -> Option<String>;
}

pub trait Validate {
    /// Names of required fields that are blank or out of range.
    fn missing_fields(&self) -> Vec<&'static str>;

    fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

pub(crate) fn blank(value: &str) -> bool {
    value.trim().is_empty()
}
