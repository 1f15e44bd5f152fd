use crate::helpers::school;
use schoolmap::config::DirectoryConfig;
use schoolmap::search::filter;
use schoolmap::store::{MemBackend, SlotBackend};
use schoolmap::{Category, Directory, School};
use std::sync::{Arc, Mutex};

fn green_valley() -> School {
    school("1", "Green Valley", Category::Lyceum, 40.0, 50.0)
}

fn blue_ridge() -> School {
    school("2", "Blue Ridge", Category::Private, 41.0, 51.0)
}

/// A directory whose slot already holds `schools`.
async fn seeded(schools: &[School]) -> Directory<MemBackend> {
    let backend = MemBackend::new();
    backend
        .write_slot("schools", &serde_json::to_vec(schools).unwrap())
        .unwrap();
    Directory::with_backend(backend, DirectoryConfig::default())
        .await
        .unwrap()
}

#[test]
fn query_matches_name_case_insensitively() {
    let c = vec![green_valley()];
    assert_eq!(filter(&c, "green", &[]), vec![&c[0]]);
    assert!(filter(&c, "blue", &[]).is_empty());
}

#[tokio::test]
async fn toggled_category_narrows_the_view() {
    let mut directory = seeded(&[green_valley(), blue_ridge()]).await;

    directory.filters_mut().toggle_category(Category::Private);
    assert_eq!(directory.visible(), &[blue_ridge()][..]);

    let c = directory.schools().to_vec();
    assert_eq!(filter(&c, "", &[Category::Private]), vec![&c[1]]);
}

#[tokio::test]
async fn toggling_twice_restores_the_full_view() {
    let mut directory = seeded(&[green_valley(), blue_ridge()]).await;

    directory.filters_mut().toggle_category(Category::Private);
    directory.filters_mut().toggle_category(Category::Private);

    assert!(directory.filters().categories().is_empty());
    assert_eq!(directory.visible(), &[green_valley(), blue_ridge()][..]);
}

#[tokio::test]
async fn clearing_categories_returns_everything() {
    let mut directory = seeded(&[green_valley(), blue_ridge()]).await;

    directory.filters_mut().toggle_category(Category::Gymnasium);
    assert!(directory.visible().is_empty());

    directory.filters_mut().clear_categories();
    assert_eq!(directory.visible().len(), 2);
}

#[tokio::test]
async fn view_updates_when_a_matching_school_is_added() {
    let mut directory = seeded(&[green_valley()]).await;
    directory.filters_mut().set_query("ridge");
    assert!(directory.visible().is_empty());

    directory.collection_mut().add_school(blue_ridge()).detach();
    assert_eq!(directory.visible(), &[blue_ridge()][..]);
}

#[tokio::test]
async fn subscribers_see_initial_population_once_then_each_add() {
    let backend = MemBackend::new();
    backend
        .write_slot("schools", &serde_json::to_vec(&[green_valley()]).unwrap())
        .unwrap();
    let mut directory = Directory::new(backend, DirectoryConfig::default()).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    for tag in ["map", "list"] {
        let sink = Arc::clone(&seen);
        directory
            .collection_mut()
            .subscribe(move |snap| sink.lock().unwrap().push((tag, snap.len())));
    }

    directory.hydrate().await;
    directory.hydrate().await;
    directory.collection_mut().add_school(blue_ridge()).detach();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![("map", 1), ("list", 1), ("map", 2), ("list", 2)]
    );
}

#[tokio::test]
async fn snapshots_only_grow_at_the_end() {
    let mut directory = seeded(&[green_valley()]).await;
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);
    directory
        .collection_mut()
        .subscribe(move |snap| sink.lock().unwrap().push(Arc::clone(snap)));

    for i in 0..5 {
        let s = school(&format!("n{}", i), "New", Category::Gymnasium, 1.0, 1.0);
        directory.collection_mut().add_school(s).detach();
    }

    let snapshots = snapshots.lock().unwrap();
    for pair in snapshots.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert_eq!(next.len(), prev.len() + 1);
        assert_eq!(&next[..prev.len()], &prev[..]);
    }
}

#[tokio::test]
async fn failed_persist_keeps_the_addition_in_memory() {
    let backend = MemBackend::new();
    backend.set_simulate_write_error(true);
    let mut directory = Directory::new(backend, DirectoryConfig::default()).unwrap();
    directory.hydrate().await;

    let err = directory
        .collection_mut()
        .add_school(green_valley())
        .wait()
        .await
        .unwrap_err();

    assert!(matches!(err, schoolmap::DirectoryError::Persist(_)));
    assert_eq!(directory.schools(), &[green_valley()][..]);
    assert!(directory.store().load().await.is_empty());
}
