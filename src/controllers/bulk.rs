use futures::future::join_all;
use tracing::{info, warn};

use super::list::ResourceList;
use crate::api::ResourceBackend;
use crate::error::Operation;
use crate::models::{Resource, Searchable};

/// Reason reported for a selected id that has no record to update.
pub const MISSING_RECORD: &str = "Élément introuvable";

/// Per-item result of a bulk action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub succeeded: Vec<String>,
    /// Failed id with the user facing reason.
    pub failed: Vec<(String, String)>,
}

impl BulkReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("{} élément(s) mis à jour", self.succeeded.len())
        } else {
            format!(
                "{} élément(s) mis à jour, {} échec(s)",
                self.succeeded.len(),
                self.failed.len()
            )
        }
    }
}

/// Applies `mutate` to a copy of every selected record, PUTs them all
/// concurrently and keeps only the server confirmed changes. Selected ids
/// with no record are reported as failed. The selection is cleared
/// whatever the outcome.
pub async fn bulk_update<R, F>(
    backend: &dyn ResourceBackend<R>,
    list: &mut ResourceList<R>,
    mutate: F,
) -> BulkReport
where
    R: Resource + Searchable,
    F: Fn(&mut R),
{
    let mut report = BulkReport::default();
    let mut targets: Vec<R> = Vec::new();
    for id in list.selected_ids() {
        match list.get(&id) {
            Some(record) => {
                let mut record = record.clone();
                mutate(&mut record);
                targets.push(record);
            }
            None => {
                warn!("bulk update of {:?} {}: not in the list", R::KIND, id);
                report.failed.push((id, MISSING_RECORD.to_string()));
            }
        }
    }

    let results = join_all(targets.iter().map(|record| backend.update(record))).await;

    for (record, result) in targets.iter().zip(results) {
        match result {
            Ok(updated) => {
                report.succeeded.push(updated.id().to_string());
                list.replace(updated);
            }
            Err(e) => {
                warn!("bulk update of {:?} {} failed: {}", R::KIND, record.id(), e);
                report
                    .failed
                    .push((record.id().to_string(), e.user_message(Operation::Update)));
            }
        }
    }

    finish(list, &report);
    report
}

/// Deletes every selected record concurrently; only confirmed deletions
/// leave the canonical list.
pub async fn bulk_delete<R>(backend: &dyn ResourceBackend<R>, list: &mut ResourceList<R>) -> BulkReport
where
    R: Resource + Searchable,
{
    let ids = list.selected_ids();
    let results = join_all(ids.iter().map(|id| backend.delete(id))).await;

    let mut report = BulkReport::default();
    for (id, result) in ids.into_iter().zip(results) {
        match result {
            Ok(()) => {
                list.remove(&id);
                report.succeeded.push(id);
            }
            Err(e) => {
                warn!("bulk delete of {:?} {} failed: {}", R::KIND, id, e);
                let reason = e.user_message(Operation::Delete);
                report.failed.push((id, reason));
            }
        }
    }

    finish(list, &report);
    report
}

fn finish<R: Resource + Searchable>(list: &mut ResourceList<R>, report: &BulkReport) {
    list.clear_selection();
    info!("bulk action on {:?}: {}", R::KIND, report.summary());
    if report.is_complete_success() {
        list.clear_error();
        list.set_notice(report.summary());
    } else {
        list.set_error(report.summary());
    }
}
