use crate::helpers::school;
use schoolmap::config::DirectoryConfig;
use schoolmap::store::{FsBackend, RecordStore, SlotBackend};
use schoolmap::{Category, Directory, School};
use std::fs;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> DirectoryConfig {
    DirectoryConfig::default().with_data_dir(dir.path())
}

#[tokio::test]
async fn round_trip_zero_one_many() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::with_backend(FsBackend::new(dir.path()));

    let cases: Vec<Vec<School>> = vec![
        vec![],
        vec![school("1", "Green Valley", Category::Lyceum, 40.0, 50.0)],
        vec![
            school("1", "Green Valley", Category::Lyceum, 40.0, 50.0)
                .address("Abay Ave 10, Almaty")
                .photo_uri("file:///cache/gv.jpg")
                .website("https://gv.kz")
                .phone("+7 777 123 4567"),
            school("2", "Blue Ridge", Category::Private, 41.0, 51.0),
            school("3", "Special Care", Category::ForSpecialChildren, -33.9, 151.2).address(""),
            school("4", "Central", Category::GeneralEducation, 0.0, 0.0),
        ],
    ];

    for schools in cases {
        store.save(&schools).await.unwrap();
        assert_eq!(store.load().await, schools);
    }
}

#[tokio::test]
async fn slot_is_a_json_array_with_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::with_backend(FsBackend::new(dir.path()));
    store
        .save(&[school("1", "Green Valley", Category::Lyceum, 40.0, 50.0).photo_uri("p")])
        .await
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("schools.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["name"], "Green Valley");
    assert_eq!(first["photoUri"], "p");
    assert_eq!(first["location"]["latitude"], 40.0);
    assert!(first.get("website").is_none());
}

#[tokio::test]
async fn reopened_directory_sees_previous_additions() {
    let dir = TempDir::new().unwrap();

    let mut first = Directory::open(config_in(&dir)).await.unwrap();
    let mut draft = schoolmap::add::SchoolDraft::new().name("Green Valley");
    draft.pick_on_map(crate::helpers::coords(40.0, 50.0));
    let (added, handle) = first.add_school(&draft).unwrap();
    handle.wait().await.unwrap();
    drop(first);

    let second = Directory::open(config_in(&dir)).await.unwrap();
    assert_eq!(second.schools(), &[added][..]);
}

#[tokio::test]
async fn filter_state_is_not_persisted() {
    let dir = TempDir::new().unwrap();

    let mut first = Directory::open(config_in(&dir)).await.unwrap();
    first.filters_mut().set_query("green");
    first.filters_mut().toggle_category(Category::Private);
    first.flush().await;
    drop(first);

    let second = Directory::open(config_in(&dir)).await.unwrap();
    assert_eq!(second.filters().query(), "");
    assert!(second.filters().categories().is_empty());
}

#[tokio::test]
async fn corrupt_slot_loads_empty_and_is_replaced_on_next_add() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schools.json"), "[{\"id\": 1,").unwrap();

    let mut directory = Directory::open(config_in(&dir)).await.unwrap();
    assert!(directory.schools().is_empty());

    let mut draft = schoolmap::add::SchoolDraft::new().name("Fresh Start");
    draft.pick_on_map(crate::helpers::coords(1.0, 2.0));
    directory.add_school(&draft).unwrap().1.wait().await.unwrap();

    let backend = FsBackend::new(dir.path());
    let bytes = backend.read_slot("schools").unwrap().unwrap();
    let stored: Vec<School> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Fresh Start");
}

#[tokio::test]
async fn rapid_additions_persist_the_full_collection() {
    let dir = TempDir::new().unwrap();
    let mut directory = Directory::open(config_in(&dir)).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let mut draft = schoolmap::add::SchoolDraft::new().name(format!("School {}", i));
        draft.pick_on_map(crate::helpers::coords(40.0, 50.0 + i as f64 / 100.0));
        handles.push(directory.add_school(&draft).unwrap().1);
    }
    for handle in handles {
        handle.wait().await.unwrap();
    }

    let persisted = directory.store().load().await;
    assert_eq!(persisted, directory.schools());
    assert_eq!(persisted.len(), 20);
}

#[tokio::test]
async fn out_of_range_location_in_slot_does_not_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("schools.json"),
        r#"[{"id":"1","name":"Far Away","category":"Private",
            "location":{"latitude":999.0,"longitude":-720.0}}]"#,
    )
    .unwrap();

    let directory = Directory::open(config_in(&dir)).await.unwrap();
    assert!(directory.schools().is_empty());
}

#[tokio::test]
async fn boundary_locations_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let mut first = Directory::open(config_in(&dir)).await.unwrap();
    for (name, lat, lon) in [("Good", 40.0, 50.0), ("Pole", 90.0, -180.0)] {
        let mut draft = schoolmap::add::SchoolDraft::new().name(name);
        draft.pick_on_map(crate::helpers::coords(lat, lon));
        first.add_school(&draft).unwrap().1.detach();
    }
    first.flush().await;
    drop(first);

    let second = Directory::open(config_in(&dir)).await.unwrap();
    let names: Vec<_> = second.schools().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Good", "Pole"]);
    assert_eq!(second.schools()[1].location.latitude(), 90.0);
}
