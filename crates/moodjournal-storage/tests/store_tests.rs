//! Journal store behavior against real files

use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel};
use moodjournal_storage::{JournalStore, StorageConfig};
use std::collections::HashSet;
use std::sync::Arc;

fn store_in(dir: &tempfile::TempDir) -> JournalStore {
    JournalStore::from_config(&StorageConfig {
        path: dir.path().join("journal_entries.json"),
    })
}

#[test]
fn test_persist_then_recent_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let tags = ClassificationResult::new(MoodLabel::Mixed, EnergyLabel::HighStress);

    let saved = store.persist("Good news, bad timing", tags).unwrap();
    let recent = store.recent(1).unwrap();

    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, saved.id);
    assert_eq!(recent[0].text, "Good news, bad timing");
    assert_eq!(recent[0].tags, tags);
}

#[test]
fn test_recent_order_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal_entries.json");
    std::fs::write(
        &path,
        r#"[
          {"id": 1, "timestamp": "2024-05-01T08:00:00Z", "text": "oldest",
           "tags": {"mood": "Neutral", "energy": "Calm"}},
          {"id": 2, "timestamp": "2024-05-03T08:00:00Z", "text": "tie low id",
           "tags": {"mood": "Neutral", "energy": "Calm"}},
          {"id": 3, "timestamp": "2024-05-03T08:00:00Z", "text": "tie high id",
           "tags": {"mood": "Neutral", "energy": "Calm"}},
          {"id": 4, "timestamp": "2024-05-02T08:00:00", "text": "naive middle",
           "tags": {"mood": "Neutral", "energy": "Calm"}}
        ]"#,
    )
    .unwrap();

    let store = JournalStore::open(path.clone());
    let texts: Vec<String> = store
        .recent(10)
        .unwrap()
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(texts, ["tie high id", "tie low id", "naive middle", "oldest"]);

    assert_eq!(store.recent(2).unwrap().len(), 2);
    assert!(store.recent(0).unwrap().is_empty());
}

#[test]
fn test_newly_persisted_entry_is_newest() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.persist("first", ClassificationResult::unknown()).unwrap();
    store.persist("second", ClassificationResult::unknown()).unwrap();
    let third = store.persist("third", ClassificationResult::unknown()).unwrap();

    let recent = store.recent(3).unwrap();
    assert_eq!(recent[0].id, third.id);
    assert_eq!(recent.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 2, 1]);
}

#[test]
fn test_concurrent_writers_get_unique_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_in(&dir));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                (0..5)
                    .map(|j| {
                        store
                            .persist(&format!("entry {}-{}", i, j), ClassificationResult::unknown())
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 40);
    assert_eq!(store.load_entries().len(), 40);
    assert_eq!(ids.iter().max(), Some(&40));
}

#[test]
fn test_odd_entry_does_not_break_journal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal_entries.json");
    std::fs::write(
        &path,
        r#"[
          {"id": 1, "timestamp": "2024-05-01T08:00:00Z", "text": "lowercase tag",
           "tags": {"mood": "positive"}},
          {"id": 2, "timestamp": "2024-05-02T08:00:00Z", "text": "made-up tag",
           "tags": {"mood": "Ecstatic", "energy": "Calm"}}
        ]"#,
    )
    .unwrap();
    let store = JournalStore::open(path.clone());

    let recent = store.recent(10).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].tags, ClassificationResult::new(MoodLabel::Unknown, EnergyLabel::Calm));
    assert_eq!(
        recent[1].tags,
        ClassificationResult::new(MoodLabel::Positive, EnergyLabel::Unknown)
    );

    let saved = store
        .persist("still writable", ClassificationResult::new(MoodLabel::Neutral, EnergyLabel::Calm))
        .unwrap();
    assert_eq!(saved.id, 3);
    assert_eq!(store.load_entries().len(), 3);
}
