//! 設定ファイルのテスト

use cafe_finder::config::Config;
use tempfile::tempdir;

/// ファイルがなければデフォルト
#[test]
fn test_load_missing_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert!(config.api_key.is_none());
    assert_eq!(config.app.search.radius_m, 1000);
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sub").join("config.json");

    let mut config = Config::default();
    config.api_key = Some("abc".into());
    config.app.search.keyword = "espresso".into();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.api_key.as_deref(), Some("abc"));
    assert_eq!(loaded.app.search.keyword, "espresso");
}

/// app セクションがなくても読める
#[test]
fn test_load_without_app_section() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"api_key": null}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.app.narrow_viewport_px, 750);
}
