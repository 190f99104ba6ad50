mod common;

use std::collections::HashMap;
use std::sync::Arc;

use learnup::api::InMemoryBackend;
use learnup::models::Note;
use learnup::services::{ChildResult, children_grade_reports, fetch_for_each_child};
use learnup::stats::{Band, Trend};

use common::{note, person};

#[tokio::test]
async fn one_failing_child_does_not_hide_the_others() {
    let children = vec![
        person("st1", "Léa", "Martin"),
        person("st2", "Hugo", "Martin"),
        person("st3", "Inès", "Martin"),
    ];

    let mut backends: HashMap<String, Arc<InMemoryBackend<Note>>> = HashMap::new();
    backends.insert(
        "st1".to_string(),
        Arc::new(InMemoryBackend::new(vec![
            note("a", Some("Maths"), 18.0, 1),
            note("b", Some("Maths"), 14.0, 2),
            note("c", Some("Maths"), 9.0, 3),
        ])),
    );
    let offline = Arc::new(InMemoryBackend::empty());
    offline.set_offline(true);
    backends.insert("st2".to_string(), offline);
    backends.insert("st3".to_string(), Arc::new(InMemoryBackend::empty()));

    let results: Vec<ChildResult<Note>> =
        fetch_for_each_child(&children, |id| backends[id].clone()).await;

    assert_eq!(results.len(), 3);
    let order: Vec<&str> = results.iter().map(|r| r.child.id.as_str()).collect();
    assert_eq!(order, vec!["st1", "st2", "st3"]);

    assert_eq!(results[0].result.as_ref().unwrap().len(), 3);
    assert!(results[0].error_message().is_none());
    assert_eq!(
        results[1].error_message().as_deref(),
        Some("Erreur lors du chargement des données")
    );
    assert!(results[2].result.as_ref().unwrap().is_empty());

    for backend in backends.values() {
        assert_eq!(backend.list_calls(), 1);
    }

    let reports = children_grade_reports(&results, 5);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].0.id, "st1");

    let maths = &reports[0].1.by_subject["Maths"];
    assert_eq!(maths.average, 13.67);
    assert_eq!(maths.band, Band::Good);
    assert_eq!(maths.trend, Trend::Stable);

    assert!(reports[1].1.overall.is_none());
}
