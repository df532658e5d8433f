use std::fs;

use tally_engine::{ensure_store_dir, FileMetaStore, MetaStore};

#[tokio::test]
async fn set_get_delete_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileMetaStore::new(dir.path().to_path_buf()).expect("store");

    assert_eq!(store.get(1, "_facebook_shares").await.unwrap(), None);

    store.set(1, "_facebook_shares", "42").await.unwrap();
    assert_eq!(
        store.get(1, "_facebook_shares").await.unwrap(),
        Some("42".to_string())
    );

    store.delete(1, "_facebook_shares").await.unwrap();
    assert_eq!(store.get(1, "_facebook_shares").await.unwrap(), None);
}

#[tokio::test]
async fn replace_overwrites_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileMetaStore::new(dir.path().to_path_buf()).expect("store");

    store.set(7, "_facebook_shares", "30").await.unwrap();
    store.replace(7, "_facebook_shares", "50").await.unwrap();

    assert_eq!(
        store.get(7, "_facebook_shares").await.unwrap(),
        Some("50".to_string())
    );
    // The post document stays present throughout.
    assert!(dir.path().join("post_7.json").exists());
}

#[tokio::test]
async fn fields_are_scoped_per_post() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileMetaStore::new(dir.path().to_path_buf()).expect("store");

    store.set(1, "_facebook_shares", "10").await.unwrap();
    store.set(2, "_facebook_shares", "20").await.unwrap();

    assert_eq!(
        store.get(1, "_facebook_shares").await.unwrap(),
        Some("10".to_string())
    );
    assert_eq!(
        store.get(2, "_facebook_shares").await.unwrap(),
        Some("20".to_string())
    );
}

#[tokio::test]
async fn values_survive_a_store_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let store = FileMetaStore::new(dir.path().to_path_buf()).expect("store");
        store.set(3, "_facebook_shares", "99").await.unwrap();
        store.set(3, "_total_shares", "120").await.unwrap();
    }

    let reopened = FileMetaStore::new(dir.path().to_path_buf()).expect("store");
    assert_eq!(
        reopened.get(3, "_facebook_shares").await.unwrap(),
        Some("99".to_string())
    );
    assert_eq!(
        reopened.get(3, "_total_shares").await.unwrap(),
        Some("120".to_string())
    );
}

#[test]
fn ensure_store_dir_rejects_a_file_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("not_a_dir");
    fs::write(&file, b"x").unwrap();

    assert!(ensure_store_dir(&file).is_err());
}
