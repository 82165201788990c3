//! ファイル保存メモのテスト
//!
//! JSONファイルを使ったメモの保存・削除・再読み込みを検証

use cafe_finder::annotations::JsonFileBackend;
use cafe_finder_common::store::KNOWN_KEYS_KEY;
use cafe_finder_common::{AnnotationStore, AppConfig, AppState, KeyValueBackend, PlaceResult};
use tempfile::tempdir;

fn open(path: &std::path::Path) -> AnnotationStore<JsonFileBackend> {
    AnnotationStore::new(JsonFileBackend::open(path).expect("ファイルを開けない"))
}

/// 存在しないファイルは空として開く
#[test]
fn test_open_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = open(&dir.path().join("annotations.json"));
    assert!(store.known_keys().unwrap().is_empty());
}

/// 保存したメモが再読み込み後も残る
#[test]
fn test_set_persists_across_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("annotations.json");

    let mut store = open(&path);
    store.set("Cafe X", "window seats").unwrap();
    assert!(path.exists());

    let reopened = open(&path);
    assert_eq!(reopened.get("Cafe X").unwrap().as_deref(), Some("window seats"));
    assert!(reopened.known_keys().unwrap().contains("Cafe X"));
}

/// 空文字の保存は削除と同じ
#[test]
fn test_empty_set_equals_delete() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("annotations.json");

    let mut store = open(&path);
    store.set("Cafe X", "note").unwrap();
    store.set("Cafe X", "").unwrap();

    let reopened = open(&path);
    assert_eq!(reopened.get("Cafe X").unwrap(), None);
    assert!(reopened.known_keys().unwrap().is_empty());
}

/// 索引はファイル内にJSON配列として保存される
#[test]
fn test_index_stored_in_same_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("annotations.json");

    let mut store = open(&path);
    store.set("B", "2").unwrap();
    store.set("A", "1").unwrap();

    let backend = JsonFileBackend::open(&path).unwrap();
    let raw = backend.get_item(KNOWN_KEYS_KEY).unwrap().expect("索引がない");
    let keys: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(keys, vec!["A".to_string(), "B".to_string()]);
}

/// 壊れたファイルはJSONエラー
#[test]
fn test_corrupt_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("annotations.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = JsonFileBackend::open(&path);
    assert!(matches!(result, Err(cafe_finder_common::Error::Json(_))));
}

/// 状態から保存したメモが、次回の初期化で読み込まれる
#[test]
fn test_state_annotation_roundtrip_through_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("annotations.json");
    let results = vec![PlaceResult {
        place_id: "p1".into(),
        name: "Sightglass".into(),
        ..Default::default()
    }];

    let mut store = open(&path);
    let mut state = AppState::initialize(results.clone(), &store, AppConfig::default()).unwrap();
    state.save_annotation("p1", "loft seating", &mut store).unwrap();

    let store = open(&path);
    let state = AppState::initialize(results, &store, AppConfig::default()).unwrap();
    assert!(state.record("p1").unwrap().has_annotation());
}

/// 書き込めない場合は失敗し、メモリ上にも値を残さない
#[test]
fn test_failed_write_leaves_store_unchanged() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("blocker").join("annotations.json");
    let mut store = open(&path);

    // 親ディレクトリの位置にファイルを置いて書き込みを妨げる
    std::fs::write(dir.path().join("blocker"), "").unwrap();

    assert!(store.set("Cafe X", "note").is_err());
    assert_eq!(store.get("Cafe X").unwrap(), None);
    assert!(store.known_keys().unwrap().is_empty());
    assert!(!path.exists());
}

/// 削除の書き込みに失敗したらメモは残る
#[test]
fn test_failed_delete_keeps_annotation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("annotations.json");
    let mut store = open(&path);
    store.set("Cafe X", "note").unwrap();

    // ファイルをディレクトリに置き換えて書き込みを妨げる
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    assert!(store.delete("Cafe X").is_err());
    assert_eq!(store.get("Cafe X").unwrap().as_deref(), Some("note"));
    assert!(store.known_keys().unwrap().contains("Cafe X"));
}
