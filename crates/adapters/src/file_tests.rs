// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn missing_key_reads_as_none() {
    let dir = TempDir::new().unwrap();
    let store = FileLocalStore::open(dir.path()).unwrap();
    assert_eq!(store.get("leadlock.Serial").await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get_roundtrips_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let store = FileLocalStore::open(dir.path().join("state")).unwrap();

    store.set("leadlock.Serial", "{}").await.unwrap();
    store
        .set("leadlock.Serial", r#"{"restart":"t1"}"#)
        .await
        .unwrap();

    assert_eq!(
        store.get("leadlock.Serial").await.unwrap().as_deref(),
        Some(r#"{"restart":"t1"}"#)
    );
    // No temporary files left behind
    let entries: Vec<_> = std::fs::read_dir(store.dir()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn separators_in_keys_stay_inside_the_directory() {
    let dir = TempDir::new().unwrap();
    let store = FileLocalStore::open(dir.path()).unwrap();

    store.set("../escape", "x").await.unwrap();
    assert!(dir.path().join(".._escape.json").exists());
}
