//! localStorage を使ったメモの保存先

use cafe_finder_common::store::STORAGE_UNAVAILABLE;
use cafe_finder_common::{AnnotationStore, Error, KeyValueBackend, Result};
use wasm_bindgen::JsValue;

fn storage_error(op: &str, err: JsValue) -> Error {
    Error::Storage(format!(
        "localStorage {} failed: {}",
        op,
        err.as_string().unwrap_or_else(|| format!("{:?}", err))
    ))
}

/// プライベートモードやサイトデータのブロックでは取得できない
fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| Error::Storage(STORAGE_UNAVAILABLE.to_string()))
}

/// window.localStorage
#[derive(Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl KeyValueBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| storage_error("get", e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| storage_error("set", e))
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| storage_error("remove", e))
    }
}

pub fn annotation_store() -> AnnotationStore<LocalStorageBackend> {
    AnnotationStore::new(LocalStorageBackend)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_annotation_round_trip_in_local_storage() {
        let mut store = annotation_store();
        store.set("Blue Bottle", "oat flat white").unwrap();
        assert_eq!(store.get("Blue Bottle").unwrap().as_deref(), Some("oat flat white"));
        assert!(store.known_keys().unwrap().contains("Blue Bottle"));

        store.set("Blue Bottle", "  ").unwrap();
        assert_eq!(store.get("Blue Bottle").unwrap(), None);
        assert!(!store.known_keys().unwrap().contains("Blue Bottle"));
    }
}
