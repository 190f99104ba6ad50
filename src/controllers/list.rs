use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::api::ResourceBackend;
use crate::error::{AppError, Operation};
use crate::models::{FILTER_ALL, Resource, Searchable};

/// How long a success notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch was already applied; the response was dropped.
    Stale,
}

/// Canonical list of one resource plus the derived filtered view and the
/// selection used by bulk actions.
#[derive(Debug, Clone)]
pub struct ResourceList<R> {
    items: Vec<R>,
    search: String,
    filters: BTreeMap<String, String>,
    selection: BTreeSet<String>,
    loading: bool,
    error: Option<String>,
    notice: Option<Notice>,
    issued_seq: u64,
    applied_seq: u64,
}

impl<R> Default for ResourceList<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            filters: BTreeMap::new(),
            selection: BTreeSet::new(),
            loading: false,
            error: None,
            notice: None,
            issued_seq: 0,
            applied_seq: 0,
        }
    }
}

impl<R: Resource + Searchable> ResourceList<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<R>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// `"all"` removes the constraint on `name`.
    pub fn set_filter(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value == FILTER_ALL {
            self.filters.remove(name);
        } else {
            self.filters.insert(name.to_string(), value);
        }
    }

    pub fn filter(&self, name: &str) -> &str {
        self.filters.get(name).map(String::as_str).unwrap_or(FILTER_ALL)
    }

    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.filters.clear();
    }

    pub fn matches(&self, item: &R) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        {
            return false;
        }
        self.filters
            .iter()
            .all(|(name, wanted)| item.facet(name).as_deref() == Some(wanted.as_str()))
    }

    /// Filtered view in canonical order, recomputed on every call.
    pub fn view(&self) -> Vec<&R> {
        self.items.iter().filter(|item| self.matches(item)).collect()
    }

    pub fn view_ids(&self) -> Vec<String> {
        self.view().into_iter().map(|r| r.id().to_string()).collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// True when the view is non-empty and every visible row is selected.
    pub fn all_visible_selected(&self) -> bool {
        let ids = self.view_ids();
        !ids.is_empty() && ids.iter().all(|id| self.selection.contains(id))
    }

    /// Header checkbox.
    pub fn toggle_all(&mut self) {
        let ids = self.view_ids();
        if self.all_visible_selected() {
            for id in &ids {
                self.selection.remove(id);
            }
        } else {
            self.selection.extend(ids);
        }
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.iter().cloned().collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Adds `record`, replacing an existing entry with the same id so an id
    /// is never present twice.
    pub fn upsert(&mut self, record: R) {
        match self.items.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.items.push(record),
        }
    }

    pub fn replace(&mut self, record: R) -> bool {
        match self.items.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id() != id);
        self.selection.remove(id);
        self.items.len() != before
    }

    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    pub fn notice_at(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.text.as_str())
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice_at(Instant::now())
    }

    /// Marks a fetch as in flight and returns its sequence number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.loading = true;
        self.issued_seq
    }

    /// Applies the result of fetch `seq` unless a newer one already landed.
    /// A failed fetch keeps the current canonical list and records the error.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<R>, AppError>) -> FetchOutcome {
        if seq <= self.applied_seq {
            debug!(
                "dropping stale {:?} response (seq {}, applied {})",
                R::KIND,
                seq,
                self.applied_seq
            );
            return FetchOutcome::Stale;
        }
        self.applied_seq = seq;
        self.loading = seq < self.issued_seq;

        match result {
            Ok(items) => {
                let known: BTreeSet<&str> = items.iter().map(|r| r.id()).collect();
                self.selection.retain(|id| known.contains(id.as_str()));
                self.items = items;
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!("failed to load {:?}: {}", R::KIND, e);
                self.error = Some(e.user_message(Operation::Load));
                FetchOutcome::Failed
            }
        }
    }

    pub async fn load(&mut self, backend: &dyn ResourceBackend<R>) -> FetchOutcome {
        let seq = self.begin_fetch();
        let result = backend.list().await;
        self.apply_fetch(seq, result)
    }
}
