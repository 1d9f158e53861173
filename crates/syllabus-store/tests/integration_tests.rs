//! Integration tests for syllabus-store
//!
//! These tests exercise loading grades from disk and the learned-set file
//! lifecycle against real temporary directories.

use std::fs;
use std::path::Path;
use std::thread;
use syllabus_domain::traits::{CurriculumSource, LearnedStore};
use syllabus_store::{
    CurriculumLibrary, FileLock, JsonCurriculumSource, LearnedFileStore, StoreError,
};

const GRADE_SEVEN: &str = r#"{
    "concepts": [
        {"concept_name": "Cell", "domain": "Biology", "strand": "Cells", "interconnections": ["Tissue"]},
        {"concept_name": "Tissue", "domain": "Biology", "strand": "Cells"},
        {"concept_name": "Friction", "domain": "Physics", "strand": "Forces"}
    ],
    "activities": [
        {"activity_name": "Onion peel slide", "parent_concept": "Cell"},
        {"activity_name": "Light and leaves", "parent_concept": "Photosynthesis II"}
    ]
}"#;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_load_grade_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "grade7.json", GRADE_SEVEN);
    let source = JsonCurriculumSource::new().with_grade("7", &path);

    let curriculum = source.load_grade("7").unwrap();
    assert_eq!(curriculum.grade(), "7");
    assert_eq!(curriculum.concepts().len(), 3);
    assert_eq!(curriculum.data_issues().len(), 1);
}

#[test]
fn test_missing_file_is_data_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonCurriculumSource::new().with_grade("8", dir.path().join("absent.json"));

    match source.load_grade("8") {
        Err(StoreError::DataNotFound { grade, .. }) => assert_eq!(grade, "8"),
        other => panic!("Expected DataNotFound, got {:?}", other),
    }
}

#[test]
fn test_failed_grade_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "grade7.json", GRADE_SEVEN);
    let bad = write(dir.path(), "grade8.json", r#"{"activities": []}"#);
    let source = JsonCurriculumSource::new()
        .with_grade("7", &good)
        .with_grade("8", &bad)
        .with_grade("9", dir.path().join("missing.json"));

    let library = CurriculumLibrary::load(&source);
    assert_eq!(library.grades(), &["7", "8", "9"]);

    assert_eq!(library.curriculum("7").unwrap().concepts().len(), 3);
    assert!(library.load_error("7").is_none());

    assert!(library.curriculum("8").unwrap().is_empty());
    assert!(matches!(
        library.load_error("8"),
        Some(StoreError::DataCorrupt { .. })
    ));
    assert!(matches!(
        library.load_error("9"),
        Some(StoreError::DataNotFound { .. })
    ));
}

#[test]
fn test_learned_file_absent_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LearnedFileStore::new(dir.path().join("learned_concepts.json"));
    let set = store.load().unwrap();
    assert!(set.as_map().is_empty());
}

#[test]
fn test_learned_file_roundtrip_and_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learned_concepts.json");
    let mut store = LearnedFileStore::new(&path);

    assert!(store.mark_learned("7", "Biology", "Cell", true).unwrap());
    assert!(store.mark_learned("7", "Biology", "Tissue", true).unwrap());
    assert!(store.mark_learned("8", "Physics", "Sound", true).unwrap());

    let reopened = LearnedFileStore::new(&path).load().unwrap();
    assert!(reopened.is_learned("7", "Biology", "Cell"));
    assert!(reopened.is_learned("8", "Physics", "Sound"));

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["7"]["Biology"], serde_json::json!(["Cell", "Tissue"]));
    assert!(!FileLock::lock_path(&path).exists());
}

#[test]
fn test_noop_mark_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learned_concepts.json");
    let mut store = LearnedFileStore::new(&path);

    assert!(!store.mark_learned("7", "Biology", "Cell", false).unwrap());
    assert!(!path.exists());

    store.mark_learned("7", "Biology", "Cell", true).unwrap();
    let before = fs::metadata(&path).unwrap().modified().unwrap();
    assert!(!store.mark_learned("7", "Biology", "Cell", true).unwrap());
    let after = fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_corrupt_learned_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "learned_concepts.json", "[1, 2");
    let mut store = LearnedFileStore::new(&path);

    assert!(matches!(store.load(), Err(StoreError::CorruptState { .. })));
    assert!(store.mark_learned("7", "Biology", "Cell", true).is_err());
    // the broken document is left for inspection rather than overwritten
    assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
}

#[test]
fn test_concurrent_writers_keep_every_update() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learned_concepts.json");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let path = path.clone();
            thread::spawn(move || {
                let mut store = LearnedFileStore::new(path);
                for j in 0..5 {
                    let name = format!("Concept {}-{}", i, j);
                    store.mark_learned("7", "Biology", &name, true).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let set = LearnedFileStore::new(&path).load().unwrap();
    assert_eq!(set.count("7"), 40);
}
