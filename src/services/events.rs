use tokio::sync::broadcast;
use tracing::debug;

use crate::models::ResourceKind;

const BUS_CAPACITY: usize = 64;

/// Cache invalidation signal: publishing a kind asks every view of that
/// collection to refetch.
#[derive(Clone, Debug)]
pub struct RefreshBus {
    tx: broadcast::Sender<ResourceKind>,
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResourceKind> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers were notified.
    pub fn invalidate(&self, kind: ResourceKind) -> usize {
        let delivered = self.tx.send(kind).unwrap_or(0);
        debug!("invalidated {:?} ({} subscriber(s))", kind, delivered);
        delivered
    }
}
