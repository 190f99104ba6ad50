pub mod bulk;
pub mod crud;
pub mod list;
pub mod quiz;

pub use bulk::{BulkReport, MISSING_RECORD, bulk_delete, bulk_update};
pub use crud::{CrudController, Modal, SubmitOutcome};
pub use list::{FetchOutcome, NOTICE_TTL, ResourceList};
pub use quiz::{QuizAttempt, QuizEditor, QuizScore};
