use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ResourceBackend;
use crate::error::AppError;
use crate::models::Resource;

/// Fixture backend for tests and offline demos. Records live in memory;
/// failures are injected explicitly, never substituted silently.
pub struct InMemoryBackend<R> {
    records: RwLock<Vec<R>>,
    offline: AtomicBool,
    failing_ids: RwLock<HashSet<String>>,
    list_calls: AtomicUsize,
}

impl<R: Resource> InMemoryBackend<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
            offline: AtomicBool::new(false),
            failing_ids: RwLock::new(HashSet::new()),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Every call fails with a 503 while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Updates and deletes of `id` fail with a 500.
    pub async fn fail_on(&self, id: &str) {
        self.failing_ids.write().await.insert(id.to_string());
    }

    pub async fn snapshot(&self) -> Vec<R> {
        self.records.read().await.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> AppError {
        AppError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: None,
        }
    }

    fn ensure_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Self::unavailable())
        } else {
            Ok(())
        }
    }

    async fn ensure_writable(&self, id: &str) -> Result<(), AppError> {
        self.ensure_online()?;
        if self.failing_ids.read().await.contains(id) {
            return Err(AppError::Api {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: Some(format!("Échec de l'opération sur {}", id)),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Resource> ResourceBackend<R> for InMemoryBackend<R> {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, AppError> {
        self.ensure_online()?;
        let record = R::from_draft(Uuid::new_v4().to_string(), draft);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &R) -> Result<R, AppError> {
        self.ensure_writable(record.id()).await?;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or(AppError::NotFound)?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.ensure_writable(id).await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
