mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use learnup::api::{InMemoryBackend, ResourceBackend};
use learnup::controllers::{FetchOutcome, ResourceList};
use learnup::error::AppError;
use learnup::models::{Course, NewCourse, ResourceKind};
use learnup::services::{RefreshBus, RefreshScheduler};

use common::{course, sample_courses};

type SharedList = Arc<RwLock<ResourceList<Course>>>;

async fn wait_until<F>(list: &SharedList, what: &str, predicate: F)
where
    F: Fn(&ResourceList<Course>) -> bool,
{
    for _ in 0..200 {
        if predicate(&*list.read().await) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {}", what);
}

fn new_course(name: &str) -> NewCourse {
    NewCourse {
        name: name.to_string(),
        subject: "s-maths".to_string(),
        teacher: "t1".to_string(),
        class_label: "3A".to_string(),
        ..NewCourse::default()
    }
}

#[tokio::test]
async fn first_tick_loads_and_later_ticks_pick_up_changes() {
    let backend = Arc::new(InMemoryBackend::new(sample_courses()));
    let list: SharedList = Arc::new(RwLock::new(ResourceList::new()));
    let scheduler =
        RefreshScheduler::<Course>::new(backend.clone(), list.clone(), Duration::from_millis(50));
    let task = tokio::spawn(scheduler.start());

    wait_until(&list, "initial load", |l| l.items().len() == 4).await;

    ResourceBackend::<Course>::create(&*backend, &new_course("Statistiques")).await.unwrap();
    wait_until(&list, "polled change", |l| l.items().len() == 5).await;
    assert!(backend.list_calls() >= 2);

    task.abort();
}

#[tokio::test]
async fn invalidation_triggers_refresh_for_matching_kind_only() {
    let backend = Arc::new(InMemoryBackend::new(sample_courses()));
    let list: SharedList = Arc::new(RwLock::new(ResourceList::new()));
    let bus = RefreshBus::new();
    let scheduler =
        RefreshScheduler::<Course>::new(backend.clone(), list.clone(), Duration::from_secs(3600))
            .with_bus(bus.clone());
    let task = tokio::spawn(scheduler.start());

    wait_until(&list, "initial load", |l| l.items().len() == 4).await;
    assert_eq!(backend.list_calls(), 1);

    ResourceBackend::<Course>::create(&*backend, &new_course("Probabilités")).await.unwrap();

    assert_eq!(bus.invalidate(ResourceKind::Parents), 1);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(list.read().await.items().len(), 4);

    bus.invalidate(ResourceKind::Courses);
    wait_until(&list, "invalidated refresh", |l| l.items().len() == 5).await;
    assert_eq!(backend.list_calls(), 2);

    task.abort();
}

#[tokio::test]
async fn failed_refresh_keeps_last_good_list_and_keeps_polling() {
    let backend = Arc::new(InMemoryBackend::new(sample_courses()));
    let list: SharedList = Arc::new(RwLock::new(ResourceList::new()));
    let scheduler =
        RefreshScheduler::<Course>::new(backend.clone(), list.clone(), Duration::from_millis(40));
    let task = tokio::spawn(scheduler.start());

    wait_until(&list, "initial load", |l| l.items().len() == 4).await;

    backend.set_offline(true);
    wait_until(&list, "error", |l| l.error().is_some()).await;
    assert_eq!(list.read().await.items().len(), 4);

    backend.set_offline(false);
    wait_until(&list, "recovery", |l| l.error().is_none()).await;
    assert_eq!(list.read().await.items().len(), 4);

    task.abort();
}

/// First call answers slowly with an old snapshot, later calls answer at once.
struct SlowFirstCall {
    calls: AtomicUsize,
}

#[async_trait]
impl ResourceBackend<Course> for SlowFirstCall {
    async fn list(&self) -> Result<Vec<Course>, AppError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(vec![course("old", "Ancien", "3A", "Maths", Default::default())])
        } else {
            Ok(vec![course("new", "Nouveau", "3A", "Maths", Default::default())])
        }
    }

    async fn create(&self, _draft: &NewCourse) -> Result<Course, AppError> {
        Err(AppError::NotFound)
    }

    async fn update(&self, _record: &Course) -> Result<Course, AppError> {
        Err(AppError::NotFound)
    }

    async fn delete(&self, _id: &str) -> Result<(), AppError> {
        Err(AppError::NotFound)
    }
}

#[tokio::test]
async fn slow_older_response_does_not_overwrite_newer_one() {
    let backend = Arc::new(SlowFirstCall {
        calls: AtomicUsize::new(0),
    });
    let list: SharedList = Arc::new(RwLock::new(ResourceList::new()));
    let scheduler =
        RefreshScheduler::<Course>::new(backend, list.clone(), Duration::from_secs(3600));

    let older = scheduler.refresh_in_background().await;
    // Make sure the slow request is in flight before the second one starts.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let newer = scheduler.refresh_in_background().await;

    assert_eq!(newer.await.unwrap(), FetchOutcome::Applied);
    assert_eq!(older.await.unwrap(), FetchOutcome::Stale);

    let list = list.read().await;
    assert_eq!(list.view_ids(), vec!["new"]);
    assert!(!list.is_loading());
}
