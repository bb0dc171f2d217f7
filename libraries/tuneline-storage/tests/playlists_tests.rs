//! Integration tests for the playlist store
//!
//! Covers creation, dedup on append, removal, clear, full-replace reorder,
//! when the document is (and is not) rewritten, and rollback or completion of
//! writes that fail or whose caller goes away.


use std::time::{Duration, Instant};
use test_helpers::*;
use tuneline_core::{TrackId, TunelineError, DEFAULT_PLAYLIST_NAME};
use tuneline_storage::{PlaylistStore, PLAYLISTS_FILE};

// ============================================================================
// Opening
// ============================================================================

#[tokio::test]
async fn test_open_creates_default_playlist() {
    let test = TestStore::new().await;

    assert_eq!(test.store.list_names().await, vec![DEFAULT_PLAYLIST_NAME]);
    assert!(test.store.get(DEFAULT_PLAYLIST_NAME).await.unwrap().is_empty());

    let json = test.file_json();
    assert_eq!(json[DEFAULT_PLAYLIST_NAME], serde_json::json!([]));
}

#[tokio::test]
async fn test_reopen_restores_state() {
    let test = TestStore::new().await;
    test.store.create("Chill").await.unwrap();
    test.store.append("Chill", track("b")).await.unwrap();
    test.store.append("Chill", track("a")).await.unwrap();

    let reopened = PlaylistStore::open(test.file()).await.unwrap();
    assert_eq!(
        reopened.list_names().await,
        vec![DEFAULT_PLAYLIST_NAME, "Chill"]
    );
    assert_eq!(ids(&reopened.get("Chill").await.unwrap()), vec!["b", "a"]);
}

#[tokio::test]
async fn test_open_adds_default_to_existing_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(PLAYLISTS_FILE);
    std::fs::write(&path, r#"{"Road Trip":[{"id":"x1","title":"Drive"}]}"#).unwrap();

    let store = PlaylistStore::open(&path).await.unwrap();
    assert_eq!(
        store.list_names().await,
        vec!["Road Trip", DEFAULT_PLAYLIST_NAME]
    );
    let tracks = store.get("Road Trip").await.unwrap();
    assert_eq!(tracks[0].title, "Drive");
    assert_eq!(tracks[0].duration_formatted, "00:00:00");
}

#[tokio::test]
async fn test_open_rejects_corrupt_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(PLAYLISTS_FILE);
    std::fs::write(&path, "{\"Chill\": [").unwrap();

    let err = PlaylistStore::open(&path).await.err().unwrap();
    assert!(matches!(err, TunelineError::PersistenceReadFailure { .. }));
}

// ============================================================================
// Create / get
// ============================================================================

#[tokio::test]
async fn test_create_duplicate_name_fails() {
    let test = TestStore::new().await;

    test.store.create("Chill").await.expect("first create");
    let err = test.store.create("Chill").await.unwrap_err();
    assert_eq!(err, TunelineError::PlaylistAlreadyExists("Chill".into()));

    let names = test.store.list_names().await;
    assert_eq!(names.iter().filter(|n| *n == "Chill").count(), 1);
}

#[tokio::test]
async fn test_create_blank_name_fails() {
    let test = TestStore::new().await;
    let err = test.store.create("  ").await.unwrap_err();
    assert!(matches!(err, TunelineError::Validation(_)));
}

#[tokio::test]
async fn test_operations_on_missing_playlist() {
    let test = TestStore::new().await;
    let missing = TunelineError::PlaylistNotFound("Nope".into());

    assert_eq!(test.store.get("Nope").await.unwrap_err(), missing);
    assert_eq!(test.store.append("Nope", track("a")).await.unwrap_err(), missing);
    assert_eq!(
        test.store.remove("Nope", &TrackId::new("a")).await.unwrap_err(),
        missing
    );
    assert_eq!(test.store.clear("Nope").await.unwrap_err(), missing);
    assert_eq!(test.store.reorder("Nope", &[]).await.unwrap_err(), missing);
}

#[tokio::test]
async fn test_get_or_default() {
    let test = TestStore::new().await;
    test.store
        .append(DEFAULT_PLAYLIST_NAME, track("a"))
        .await
        .unwrap();

    assert_eq!(ids(&test.store.get_or_default(None).await.unwrap()), vec!["a"]);
    assert_eq!(ids(&test.store.get_or_default(Some("")).await.unwrap()), vec!["a"]);
    assert!(test.store.get_or_default(Some("Nope")).await.is_err());
}

// ============================================================================
// Append
// ============================================================================

#[tokio::test]
async fn test_append_twice_is_append_once() {
    let test = TestStore::new().await;
    test.store.create("Chill").await.unwrap();

    let once = test.store.append("Chill", track("a")).await.unwrap();
    let twice = test.store.append("Chill", track("a")).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 1);
}

#[tokio::test]
async fn test_duplicate_append_does_not_persist() {
    let test = TestStore::new().await;
    test.store.create("Chill").await.unwrap();
    test.store.append("Chill", track("a")).await.unwrap();

    test.forget_file();
    test.store.append("Chill", track("a")).await.unwrap();
    assert!(!test.file().exists());

    test.store.append("Chill", track("b")).await.unwrap();
    assert!(test.file().exists());
    assert_eq!(test.file_json()["Chill"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_append_rejects_blank_id() {
    let test = TestStore::new().await;
    let err = test
        .store
        .append(DEFAULT_PLAYLIST_NAME, track(""))
        .await
        .unwrap_err();
    assert!(matches!(err, TunelineError::Validation(_)));
    assert!(test.store.get(DEFAULT_PLAYLIST_NAME).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_document_uses_camel_case_tracks() {
    let test = TestStore::new().await;
    test.store
        .append(DEFAULT_PLAYLIST_NAME, track("a"))
        .await
        .unwrap();

    let stored = &test.file_json()[DEFAULT_PLAYLIST_NAME][0];
    assert_eq!(stored["id"], "a");
    assert_eq!(stored["sourceRef"], "https://www.youtube.com/watch?v=a");
    assert_eq!(stored["durationFormatted"], "00:03:30");
    assert_eq!(stored["channelName"], "Test Channel");
    assert!(stored["thumbnailUrl"].is_null());
}

// ============================================================================
// Remove / clear
// ============================================================================

#[tokio::test]
async fn test_remove_absent_id_does_not_persist() {
    let test = TestStore::new().await;
    test.store.create("Chill").await.unwrap();
    test.store.append("Chill", track("a")).await.unwrap();

    test.forget_file();
    let tracks = test
        .store
        .remove("Chill", &TrackId::new("zzz"))
        .await
        .unwrap();
    assert_eq!(ids(&tracks), vec!["a"]);
    assert!(!test.file().exists());

    let tracks = test.store.remove("Chill", &TrackId::new("a")).await.unwrap();
    assert!(tracks.is_empty());
    assert!(test.file().exists());
}

#[tokio::test]
async fn test_clear_persists_even_when_empty() {
    let test = TestStore::new().await;
    test.store.create("Chill").await.unwrap();

    test.forget_file();
    let tracks = test.store.clear("Chill").await.unwrap();
    assert!(tracks.is_empty());
    assert!(test.file().exists());
    assert_eq!(test.file_json()["Chill"], serde_json::json!([]));
}

// ============================================================================
// Reorder
// ============================================================================

#[tokio::test]
async fn test_reorder_semantics() {
    let test = TestStore::new().await;
    test.store.create("Mix").await.unwrap();
    for id in ["a", "b", "c"] {
        test.store.append("Mix", track(id)).await.unwrap();
    }

    let tracks = test
        .store
        .reorder("Mix", &track_ids(&["c", "a", "b"]))
        .await
        .unwrap();
    assert_eq!(ids(&tracks), vec!["c", "a", "b"]);

    let tracks = test
        .store
        .reorder("Mix", &track_ids(&["ghost", "b", "c"]))
        .await
        .unwrap();
    assert_eq!(ids(&tracks), vec!["b", "c"]);

    let reopened = PlaylistStore::open(test.file()).await.unwrap();
    assert_eq!(ids(&reopened.get("Mix").await.unwrap()), vec!["b", "c"]);
}

#[tokio::test]
async fn test_reorder_always_persists() {
    let test = TestStore::new().await;
    test.store.append(DEFAULT_PLAYLIST_NAME, track("a")).await.unwrap();

    test.forget_file();
    test.store
        .reorder(DEFAULT_PLAYLIST_NAME, &track_ids(&["a"]))
        .await
        .unwrap();
    assert!(test.file().exists());
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_appends_all_land() {
    let test = TestStore::new().await;
    let store = std::sync::Arc::new(test.store);

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .append(DEFAULT_PLAYLIST_NAME, track(&format!("t{i}")))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get(DEFAULT_PLAYLIST_NAME).await.unwrap().len(), 20);

    let reopened = PlaylistStore::open(test.dir.path().join(PLAYLISTS_FILE))
        .await
        .unwrap();
    assert_eq!(reopened.get(DEFAULT_PLAYLIST_NAME).await.unwrap().len(), 20);
}

// ============================================================================
// Failed and abandoned writes
// ============================================================================

#[tokio::test]
async fn test_failed_write_rolls_back() {
    let test = TestStore::new().await;
    // A directory where the temp file should go makes the rewrite fail
    std::fs::create_dir(test.dir.path().join(format!("{PLAYLISTS_FILE}.tmp"))).unwrap();

    let err = test
        .store
        .append(DEFAULT_PLAYLIST_NAME, track("a"))
        .await
        .unwrap_err();
    assert!(matches!(err, TunelineError::PersistenceWriteFailure { .. }));
    assert!(test.store.get(DEFAULT_PLAYLIST_NAME).await.unwrap().is_empty());

    let err = test.store.create("Chill").await.unwrap_err();
    assert!(matches!(err, TunelineError::PersistenceWriteFailure { .. }));
    assert_eq!(test.store.list_names().await, vec![DEFAULT_PLAYLIST_NAME]);
    assert_eq!(test.file_json()[DEFAULT_PLAYLIST_NAME], serde_json::json!([]));
}

#[tokio::test]
async fn test_abandoned_append_still_reaches_disk() {
    let test = TestStore::new().await;

    // The caller gives up after the first poll
    let abandoned = tokio::time::timeout(
        Duration::ZERO,
        test.store.append(DEFAULT_PLAYLIST_NAME, track("a")),
    )
    .await;
    assert!(abandoned.is_err());

    let deadline = Instant::now() + Duration::from_secs(5);
    while test.file_json()[DEFAULT_PLAYLIST_NAME] == serde_json::json!([]) {
        assert!(Instant::now() < deadline, "append never reached the document");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(ids(&test.store.get(DEFAULT_PLAYLIST_NAME).await.unwrap()), vec!["a"]);
    assert_eq!(test.file_json()[DEFAULT_PLAYLIST_NAME][0]["id"], "a");
}
