use tracing::{info, warn};

use super::list::ResourceList;
use crate::api::ResourceBackend;
use crate::error::{AppError, Operation};
use crate::models::{Resource, Searchable, Validate};

/// Modal state of a create/edit/delete dialog.
#[derive(Debug, Clone)]
pub enum Modal<R: Resource> {
    Closed,
    Creating(R::Draft),
    Editing(R),
    ConfirmDelete(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(String),
    Updated(String),
    Deleted(String),
}

#[derive(Debug, Clone)]
pub struct CrudController<R: Resource> {
    modal: Modal<R>,
    error: Option<String>,
}

impl<R: Resource> Default for CrudController<R> {
    fn default() -> Self {
        Self {
            modal: Modal::Closed,
            error: None,
        }
    }
}

fn validation_error(missing: &[&str]) -> AppError {
    AppError::BadRequest(format!(
        "Veuillez remplir les champs obligatoires: {}",
        missing.join(", ")
    ))
}

impl<R: Resource + Searchable> CrudController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> &Modal<R> {
        &self.modal
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.modal, Modal::Closed)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open_create(&mut self) {
        self.open_create_with(R::Draft::default());
    }

    pub fn open_create_with(&mut self, draft: R::Draft) {
        self.modal = Modal::Creating(draft);
        self.error = None;
    }

    /// Edits a full copy; the canonical record is untouched until submit.
    pub fn open_edit(&mut self, record: &R) {
        self.modal = Modal::Editing(record.clone());
        self.error = None;
    }

    pub fn open_delete(&mut self, id: &str) {
        self.modal = Modal::ConfirmDelete(id.to_string());
        self.error = None;
    }

    pub fn close(&mut self) {
        self.modal = Modal::Closed;
        self.error = None;
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match &mut self.modal {
            Modal::Creating(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn editing_mut(&mut self) -> Option<&mut R> {
        match &mut self.modal {
            Modal::Editing(record) => Some(record),
            _ => None,
        }
    }

    /// Validates and sends the open modal's request, merging the server's
    /// answer into `list`. On failure the modal stays open with a message
    /// and `list` is left untouched.
    pub async fn submit(
        &mut self,
        backend: &dyn ResourceBackend<R>,
        list: &mut ResourceList<R>,
    ) -> Result<SubmitOutcome, AppError> {
        let result = match &self.modal {
            Modal::Closed => return Err(AppError::BadRequest("Aucune action en cours".to_string())),
            Modal::Creating(draft) => Self::create(backend, list, draft).await,
            Modal::Editing(record) => Self::update(backend, list, record).await,
            Modal::ConfirmDelete(id) => Self::delete(backend, list, id).await,
        };

        match result {
            Ok(outcome) => {
                list.set_notice(match &outcome {
                    SubmitOutcome::Created(_) => "Ajouté avec succès",
                    SubmitOutcome::Updated(_) => "Modifié avec succès",
                    SubmitOutcome::Deleted(_) => "Supprimé avec succès",
                });
                self.close();
                Ok(outcome)
            }
            Err((op, e)) => {
                warn!("{:?} {:?} failed: {}", op, R::KIND, e);
                self.error = Some(e.user_message(op));
                Err(e)
            }
        }
    }

    async fn create(
        backend: &dyn ResourceBackend<R>,
        list: &mut ResourceList<R>,
        draft: &R::Draft,
    ) -> Result<SubmitOutcome, (Operation, AppError)> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err((Operation::Create, validation_error(&missing)));
        }
        let created = backend
            .create(draft)
            .await
            .map_err(|e| (Operation::Create, e))?;
        let id = created.id().to_string();
        list.upsert(created);
        info!("created {:?} {}", R::KIND, id);
        Ok(SubmitOutcome::Created(id))
    }

    async fn update(
        backend: &dyn ResourceBackend<R>,
        list: &mut ResourceList<R>,
        record: &R,
    ) -> Result<SubmitOutcome, (Operation, AppError)> {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            return Err((Operation::Update, validation_error(&missing)));
        }
        let updated = backend
            .update(record)
            .await
            .map_err(|e| (Operation::Update, e))?;
        let id = updated.id().to_string();
        if !list.replace(updated) {
            warn!("updated {:?} {} is not in the canonical list", R::KIND, id);
        }
        Ok(SubmitOutcome::Updated(id))
    }

    async fn delete(
        backend: &dyn ResourceBackend<R>,
        list: &mut ResourceList<R>,
        id: &str,
    ) -> Result<SubmitOutcome, (Operation, AppError)> {
        backend
            .delete(id)
            .await
            .map_err(|e| (Operation::Delete, e))?;
        list.remove(id);
        info!("deleted {:?} {}", R::KIND, id);
        Ok(SubmitOutcome::Deleted(id.to_string()))
    }
}
