use std::sync::Arc;

use futures::future::join_all;
use tracing::warn;

use crate::api::{self, LearnUpHttpClient, ResourceBackend};
use crate::error::{AppError, Operation};
use crate::models::{Absence, Note, PersonSummary, Resource};
use crate::stats::{GradeReport, aggregate_grades};

/// Outcome of one child's request in a fan-out.
#[derive(Debug)]
pub struct ChildResult<R> {
    pub child: PersonSummary,
    pub result: Result<Vec<R>, AppError>,
}

impl<R> ChildResult<R> {
    pub fn error_message(&self) -> Option<String> {
        self.result
            .as_ref()
            .err()
            .map(|e| e.user_message(Operation::Load))
    }
}

/// Issues one list request per child concurrently and waits for all of
/// them. A failing child does not hide the others' results.
pub async fn fetch_for_each_child<R, B, F>(
    children: &[PersonSummary],
    backend_for: F,
) -> Vec<ChildResult<R>>
where
    R: Resource,
    B: ResourceBackend<R>,
    F: Fn(&str) -> B,
{
    let backends: Vec<B> = children.iter().map(|c| backend_for(&c.id)).collect();
    let results = join_all(backends.iter().map(|b| ResourceBackend::<R>::list(b))).await;

    children
        .iter()
        .cloned()
        .zip(results)
        .map(|(child, result)| {
            if let Err(e) = &result {
                warn!("failed to load {:?} for child {}: {}", R::KIND, child.id, e);
            }
            ChildResult { child, result }
        })
        .collect()
}

pub async fn fetch_children_notes(
    api: &Arc<LearnUpHttpClient>,
    children: &[PersonSummary],
) -> Vec<ChildResult<Note>> {
    fetch_for_each_child(children, |id| api::student_notes(api, id)).await
}

pub async fn fetch_children_absences(
    api: &Arc<LearnUpHttpClient>,
    children: &[PersonSummary],
) -> Vec<ChildResult<Absence>> {
    fetch_for_each_child(children, |id| api::student_absences(api, id)).await
}

/// Grade report per child; children whose request failed are skipped.
pub fn children_grade_reports(
    results: &[ChildResult<Note>],
    window: usize,
) -> Vec<(PersonSummary, GradeReport)> {
    results
        .iter()
        .filter_map(|r| {
            r.result
                .as_ref()
                .ok()
                .map(|notes| (r.child.clone(), aggregate_grades(notes, window)))
        })
        .collect()
}
