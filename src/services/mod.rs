pub mod events;
pub mod family;
pub mod scheduler;

pub use events::RefreshBus;
pub use family::{
    ChildResult, children_grade_reports, fetch_children_absences, fetch_children_notes,
    fetch_for_each_child,
};
pub use scheduler::RefreshScheduler;
