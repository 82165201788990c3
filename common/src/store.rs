//! メモ（アノテーション）の永続化
//!
//! キー→文字列の単純なストレージを包み、メモの取得・保存・削除と
//! 「メモを持つキー」の索引を管理する。索引は値と同じストレージに
//! JSON配列として保存される。

use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

/// 索引を保存するキー
pub const KNOWN_KEYS_KEY: &str = "memosArray";

/// ストレージ自体が使えないときのメッセージ
pub const STORAGE_UNAVAILABLE: &str =
    "Please check if your browser settings allow caching with localStorage API";

/// キー→文字列の永続ストレージ
///
/// ブラウザでは localStorage、CLIではJSONファイルが実装する。
pub trait KeyValueBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストレージ（テスト・一時利用向け）
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> AnnotationStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        if key == KNOWN_KEYS_KEY {
            return Ok(None);
        }
        self.backend.get_item(key)
    }

    /// メモを保存する。空白だけの値は削除として扱う
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return self.delete(key);
        }
        reject_reserved(key)?;

        let previous = self.backend.get_item(key)?;
        self.backend.set_item(key, value)?;
        if let Err(e) = self.update_index(key, true) {
            self.restore(key, previous);
            return Err(e);
        }
        debug!(key, "annotation saved");
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<()> {
        reject_reserved(key)?;

        let previous = self.backend.get_item(key)?;
        self.backend.remove_item(key)?;
        if let Err(e) = self.update_index(key, false) {
            self.restore(key, previous);
            return Err(e);
        }
        debug!(key, "annotation deleted");
        Ok(())
    }

    /// メモを持つキーの一覧（名前順）
    pub fn known_keys(&self) -> Result<BTreeSet<String>> {
        match self.backend.get_item(KNOWN_KEYS_KEY)? {
            Some(raw) => {
                let keys: Vec<String> = serde_json::from_str(&raw)?;
                Ok(keys.into_iter().collect())
            }
            None => Ok(BTreeSet::new()),
        }
    }

    /// 索引にキーを追加・削除する（変化がなければ書き込まない）
    fn update_index(&mut self, key: &str, present: bool) -> Result<()> {
        let mut keys = self.known_keys()?;
        let changed = if present {
            keys.insert(key.to_string())
        } else {
            keys.remove(key)
        };
        if changed {
            self.save_known_keys(&keys)?;
        }
        Ok(())
    }

    /// 索引の更新に失敗したとき、値を元に戻す
    fn restore(&mut self, key: &str, previous: Option<String>) {
        let rollback = match &previous {
            Some(value) => self.backend.set_item(key, value),
            None => self.backend.remove_item(key),
        };
        if let Err(e) = rollback {
            warn!(key, "annotation rollback failed: {}", e);
        }
    }

    fn save_known_keys(&mut self, keys: &BTreeSet<String>) -> Result<()> {
        let raw = serde_json::to_string(&keys.iter().collect::<Vec<_>>())?;
        self.backend.set_item(KNOWN_KEYS_KEY, &raw)
    }
}

fn reject_reserved(key: &str) -> Result<()> {
    if key == KNOWN_KEYS_KEY {
        return Err(Error::Storage(format!("reserved key: {}", key)));
    }
    Ok(())
}
