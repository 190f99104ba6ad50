mod common;

use std::time::Instant;

use learnup::api::InMemoryBackend;
use learnup::controllers::{FetchOutcome, NOTICE_TTL, ResourceList};
use learnup::models::Course;

use common::sample_courses;

fn ids(list: &ResourceList<Course>) -> Vec<String> {
    list.view_ids()
}

#[tokio::test]
async fn load_seeds_canonical_list_and_view() {
    let backend = InMemoryBackend::new(sample_courses());
    let mut list = ResourceList::<Course>::new();

    let outcome = list.load(&backend).await;

    assert_eq!(outcome, FetchOutcome::Applied);
    assert!(!list.is_loading());
    assert!(list.error().is_none());
    assert_eq!(list.items().len(), 4);
    assert_eq!(ids(&list), vec!["c1", "c2", "c3", "c4"]);
}

#[tokio::test]
async fn failed_load_surfaces_error_and_leaves_list_empty() {
    let backend = InMemoryBackend::new(sample_courses());
    backend.set_offline(true);
    let mut list = ResourceList::<Course>::new();

    let outcome = list.load(&backend).await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(list.items().is_empty());
    assert_eq!(list.error(), Some("Erreur lors du chargement des données"));
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let mut list = ResourceList::with_items(sample_courses());

    list.set_search("MATHS");
    assert_eq!(ids(&list), vec!["c1", "c2"]);

    list.set_search("curie");
    assert_eq!(ids(&list).len(), 4);

    list.set_search("3a");
    assert_eq!(ids(&list), vec!["c1", "c3"]);

    list.set_search("   ");
    assert_eq!(ids(&list).len(), 4);
}

#[test]
fn filter_order_does_not_change_the_view() {
    let mut a = ResourceList::with_items(sample_courses());
    a.set_search("a");
    a.set_filter("status", "active");
    a.set_filter("class", "3A");

    let mut b = ResourceList::with_items(sample_courses());
    b.set_filter("class", "3A");
    b.set_filter("status", "active");
    b.set_search("a");

    assert_eq!(ids(&a), ids(&b));

    let expected: Vec<String> = sample_courses()
        .iter()
        .filter(|c| a.matches(c))
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(ids(&a), expected);
}

#[test]
fn all_sentinel_clears_a_filter() {
    let mut list = ResourceList::with_items(sample_courses());
    list.set_filter("status", "draft");
    assert_eq!(ids(&list), vec!["c4"]);
    assert_eq!(list.filter("status"), "draft");

    list.set_filter("status", "all");
    assert_eq!(ids(&list).len(), 4);
    assert_eq!(list.filter("status"), "all");
}

#[test]
fn view_follows_canonical_changes() {
    let mut list = ResourceList::with_items(sample_courses());
    list.set_filter("class", "3A");
    assert_eq!(ids(&list), vec!["c1", "c3"]);

    assert!(list.remove("c1"));
    assert_eq!(ids(&list), vec!["c3"]);

    let mut extra = common::course("c9", "Optique", "3A", "Physique", Default::default());
    extra.room = None;
    list.upsert(extra);
    assert_eq!(ids(&list), vec!["c3", "c9"]);
}

#[test]
fn select_all_then_deselect_one() {
    let mut list = ResourceList::with_items(sample_courses());
    list.set_filter("subject", "s-maths");
    assert_eq!(ids(&list).len(), 2);

    list.toggle_all();
    assert_eq!(list.selection_len(), 2);
    assert!(list.all_visible_selected());

    list.toggle("c1");
    assert_eq!(list.selection_len(), 1);
    assert!(!list.all_visible_selected());
}

#[test]
fn header_toggle_twice_returns_to_empty() {
    let mut list = ResourceList::with_items(sample_courses());
    list.toggle_all();
    assert_eq!(list.selection_len(), 4);
    list.toggle_all();
    assert_eq!(list.selection_len(), 0);
    assert!(!list.has_selection());
}

#[test]
fn stale_fetch_results_are_discarded() {
    let mut list = ResourceList::<Course>::new();
    let first = list.begin_fetch();
    let second = list.begin_fetch();

    let newer = vec![common::course("n1", "Nouveau", "3A", "Maths", Default::default())];
    assert_eq!(list.apply_fetch(second, Ok(newer)), FetchOutcome::Applied);
    assert!(!list.is_loading());

    assert_eq!(list.apply_fetch(first, Ok(sample_courses())), FetchOutcome::Stale);
    assert_eq!(ids(&list), vec!["n1"]);
}

#[test]
fn refresh_drops_selection_of_vanished_records() {
    let mut list = ResourceList::with_items(sample_courses());
    list.toggle("c1");
    list.toggle("c4");

    let seq = list.begin_fetch();
    let remaining: Vec<Course> = sample_courses().into_iter().filter(|c| c.id != "c4").collect();
    list.apply_fetch(seq, Ok(remaining));

    assert_eq!(list.selected_ids(), vec!["c1".to_string()]);
}

#[test]
fn notice_expires() {
    let mut list = ResourceList::<Course>::new();
    list.set_notice("Ajouté avec succès");
    let now = Instant::now();
    assert_eq!(list.notice_at(now), Some("Ajouté avec succès"));
    assert_eq!(list.notice_at(now + NOTICE_TTL), None);
}
