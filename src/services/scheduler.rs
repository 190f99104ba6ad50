use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::ResourceBackend;
use crate::controllers::{FetchOutcome, ResourceList};
use crate::models::{Resource, ResourceKind, Searchable};
use crate::services::events::RefreshBus;

/// Periodic refresher of a shared canonical list
/// Refetches on every tick and on every matching invalidation event
pub struct RefreshScheduler<R: Resource> {
    backend: Arc<dyn ResourceBackend<R>>,
    list: Arc<RwLock<ResourceList<R>>>,
    interval: Duration,
    bus: Option<RefreshBus>,
}

enum Wake {
    Tick,
    Event(Result<ResourceKind, RecvError>),
}

impl<R: Resource + Searchable> RefreshScheduler<R> {
    pub fn new(
        backend: Arc<dyn ResourceBackend<R>>,
        list: Arc<RwLock<ResourceList<R>>>,
        interval: Duration,
    ) -> Self {
        Self {
            backend,
            list,
            interval,
            bus: None,
        }
    }

    pub fn with_bus(mut self, bus: RefreshBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Runs forever. The first tick fires immediately. A fetch is issued on
    /// every tick even if the previous one is still in flight; the list
    /// drops any response older than the latest applied one.
    pub async fn start(self) {
        info!(
            "Starting {:?} refresh scheduler (interval: {:?})",
            R::KIND,
            self.interval
        );

        let mut events = self.bus.as_ref().map(RefreshBus::subscribe);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let wake = tokio::select! {
                _ = ticker.tick() => Wake::Tick,
                event = next_event(&mut events) => Wake::Event(event),
            };

            match wake {
                Wake::Tick => {}
                Wake::Event(Ok(kind)) if kind == R::KIND => {
                    debug!("{:?} invalidated, refreshing", kind);
                }
                Wake::Event(Ok(_)) => continue,
                Wake::Event(Err(RecvError::Lagged(missed))) => {
                    warn!("missed {} invalidation event(s), refreshing", missed);
                }
                Wake::Event(Err(RecvError::Closed)) => {
                    events = None;
                    continue;
                }
            }

            // The task finishes on its own; overlapping fetches are expected.
            let _ = self.refresh_in_background().await;
        }
    }

    /// Reserves the next sequence number, then fetches on a separate task.
    pub async fn refresh_in_background(&self) -> JoinHandle<FetchOutcome> {
        let seq = self.list.write().await.begin_fetch();
        let backend = self.backend.clone();
        let list = self.list.clone();

        tokio::spawn(async move {
            let result = backend.list().await;
            let outcome = list.write().await.apply_fetch(seq, result);
            match outcome {
                FetchOutcome::Applied => debug!("{:?} refresh #{} applied", R::KIND, seq),
                FetchOutcome::Stale => debug!("{:?} refresh #{} was stale", R::KIND, seq),
                // Keep polling; the error is already on the list.
                FetchOutcome::Failed => warn!("{:?} refresh #{} failed", R::KIND, seq),
            }
            outcome
        })
    }
}

async fn next_event(events: &mut Option<Receiver<ResourceKind>>) -> Result<ResourceKind, RecvError> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
