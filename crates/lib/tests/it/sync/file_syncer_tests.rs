//! FileSyncer integration tests
//!
//! Binding, explicit save/load, and automatic saving after changes.

use std::fs;

use arbor::{
    array,
    format::{Formatter, JsonFormatter, YamlFormatter},
    group,
    sync::{AutoSave, FileSyncer, SyncConfig},
    tree::Document,
};
use tempfile::TempDir;

use crate::helpers::*;

fn setup(config: SyncConfig) -> (TempDir, FileSyncer) {
    let dir = tempfile::tempdir().unwrap();
    let syncer = FileSyncer::with_config(dir.path().join("doc.json"), JsonFormatter::new(), config);
    (dir, syncer)
}

fn read_file(syncer: &FileSyncer) -> Document {
    let data = fs::read(syncer.path()).unwrap();
    JsonFormatter::new().decode(&data).unwrap()
}

#[test]
fn test_operations_need_a_bound_document() {
    let (_dir, syncer) = setup(SyncConfig::default());
    assert!(!syncer.is_bound());

    assert!(syncer.save().unwrap_err().is_not_found());
    assert!(syncer.load().unwrap_err().is_not_found());
    assert!(syncer.read(|_| ()).unwrap_err().is_not_found());
    assert!(syncer.update(|_| ()).unwrap_err().is_not_found());
}

#[test]
#[should_panic(expected = "group root")]
fn test_binding_a_non_group_panics() {
    let (_dir, syncer) = setup(SyncConfig::default());
    syncer.bind(Document::new(array![1]));
}

#[test]
fn test_save_writes_staticized_document() {
    let (_dir, syncer) = setup(SyncConfig::default());
    syncer.bind(mixed_doc());
    syncer.save().unwrap();

    assert_eq!(read_file(&syncer).staticize(), mixed_doc().staticize());
}

#[test]
fn test_update_saves_on_change() {
    let (_dir, syncer) = setup(SyncConfig::default());
    syncer.bind(Document::new(group! { "count" => 1 }));
    assert!(!syncer.path().exists());

    syncer.update(|doc| doc.set("count", 2)).unwrap().unwrap();
    assert_eq!(read_file(&syncer).get("count").unwrap().as_i64().unwrap(), 2);
    assert!(!syncer.is_dirty());
}

#[test]
fn test_update_without_change_does_not_save() {
    let (_dir, syncer) = setup(SyncConfig::default());
    syncer.bind(Document::new(group! { "count" => 1 }));

    let count = syncer
        .update(|doc| doc.get("count").unwrap().as_i64().unwrap())
        .unwrap();
    assert_eq!(count, 1);
    assert!(!syncer.path().exists());
}

#[test]
fn test_auto_save_disabled() {
    let (_dir, syncer) = setup(SyncConfig::default().with_auto_save(AutoSave::Disabled));
    syncer.bind(Document::default());

    syncer.update(|doc| doc.set("a", 1)).unwrap().unwrap();
    assert!(!syncer.path().exists());
    assert!(syncer.is_dirty());

    syncer.save().unwrap();
    assert!(!syncer.is_dirty());
    assert!(syncer.path().exists());
}

#[test]
fn test_auto_load_disables_save_on_change() {
    let config = SyncConfig::default().with_auto_load(std::time::Duration::from_secs(3600));
    let (_dir, syncer) = setup(config);
    syncer.bind(Document::default());

    syncer.update(|doc| doc.set("a", 1)).unwrap().unwrap();
    assert!(!syncer.path().exists());
}

#[test]
fn test_soft_load_merges_file_into_document() {
    let (_dir, syncer) = setup(SyncConfig::default());
    fs::write(
        syncer.path(),
        br#"{"shared": "from file", "nested": {"file": 1}, "file_only": true}"#,
    )
    .unwrap();
    syncer.bind(Document::new(group! {
        "shared" => "in memory",
        "nested" => group! { "memory" => 1 },
        "memory_only" => true,
    }));

    syncer.load().unwrap();
    syncer
        .read(|doc| {
            assert_doc_eq(
                doc,
                group! {
                    "shared" => "from file",
                    "nested" => group! { "memory" => 1, "file" => 1 },
                    "file_only" => true,
                    "memory_only" => true,
                },
            );
            assert_parent_links(doc.root());
        })
        .unwrap();
}

#[test]
fn test_hard_load_replaces_document() {
    let (_dir, syncer) = setup(SyncConfig::default().with_hard_load(true));
    fs::write(syncer.path(), br#"{"file_only": [1, 2]}"#).unwrap();
    syncer.bind(Document::new(group! { "memory_only" => true }));

    syncer.load().unwrap();
    syncer
        .read(|doc| assert_doc_eq(doc, group! { "file_only" => array![1, 2] }))
        .unwrap();
}

#[test]
fn test_load_does_not_trigger_auto_save() {
    let (dir, syncer) = setup(SyncConfig::default());
    let source = dir.path().join("source.json");
    fs::write(&source, br#"{"a": 1}"#).unwrap();
    syncer.set_path(&source);
    syncer.bind(Document::default());

    syncer.load().unwrap();
    assert!(!syncer.is_dirty());

    // Point the syncer elsewhere: an update without changes must not write
    let target = dir.path().join("target.json");
    syncer.set_path(&target);
    syncer.update(|_| ()).unwrap();
    assert!(!target.exists());
}

#[test]
fn test_load_missing_file_fails() {
    let (_dir, syncer) = setup(SyncConfig::default());
    syncer.bind(Document::default());
    let err = syncer.load().unwrap_err();
    assert!(err.is_io_error());
    assert!(err.is_not_found());
}

#[test]
fn test_load_invalid_file_keeps_document() {
    let (_dir, syncer) = setup(SyncConfig::default());
    fs::write(syncer.path(), b"[1, 2]").unwrap();
    syncer.bind(Document::new(group! { "a" => 1 }));

    assert!(syncer.load().unwrap_err().is_format_error());
    syncer.read(|doc| assert_doc_eq(doc, group! { "a" => 1 })).unwrap();
}

#[test]
fn test_rebinding_releases_previous_document() {
    let (_dir, syncer) = setup(SyncConfig::default());
    assert!(syncer.bind(Document::new(group! { "first" => 1 })).is_none());

    let mut previous = syncer.bind(Document::new(group! { "second" => 2 })).unwrap();
    assert!(!previous.root().has_on_change());
    previous.set("first", 10).unwrap();
    assert!(!syncer.is_dirty());

    let current = syncer.unbind().unwrap();
    assert!(current.has("second"));
    assert!(!current.root().has_on_change());
    assert!(!syncer.is_bound());
}

#[test]
fn test_reconfiguration() {
    let (dir, syncer) = setup(SyncConfig::default());
    syncer.bind(Document::new(group! { "a" => group! { "b" => 1 } }));

    syncer.set_formatter(JsonFormatter::pretty());
    let other = dir.path().join("other.json");
    syncer.set_path(&other);
    assert_eq!(syncer.path(), other);

    syncer.save().unwrap();
    let text = fs::read_to_string(&other).unwrap();
    assert!(text.contains("\n  \"a\": {"));

    syncer.set_config(SyncConfig::default().with_hard_load(true));
    assert!(syncer.config().hard_load);
}

#[test]
fn test_yaml_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.yaml");
    let syncer = FileSyncer::with_config(
        &path,
        YamlFormatter::new(),
        SyncConfig::default().with_hard_load(true),
    );
    syncer.bind(mixed_doc());
    syncer.save().unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("name: arbor\n"));

    syncer.update(|doc| doc.set("name", "changed")).unwrap().unwrap();
    fs::write(&path, b"name: from disk\n").unwrap();
    syncer.load().unwrap();
    syncer
        .read(|doc| assert_doc_eq(doc, group! { "name" => "from disk" }))
        .unwrap();
}
