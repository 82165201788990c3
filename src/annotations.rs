//! JSONファイルによるメモ保存
//!
//! ブラウザの localStorage と同じ キー→文字列 の形をファイル1つで持つ。
//! 書き込みのたびにファイル全体を保存し、保存できたときだけメモリ上の内容を更新する。

use cafe_finder_common::{Error, KeyValueBackend};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub const ANNOTATIONS_FILE_NAME: &str = "annotations.json";

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileBackend {
    /// ファイルを読み込む（なければ空）
    pub fn open(path: &Path) -> cafe_finder_common::Result<Self> {
        let items = if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            items,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> cafe_finder_common::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))?;
        serde_json::to_writer_pretty(BufWriter::new(file), items)?;
        Ok(())
    }
}

impl KeyValueBackend for JsonFileBackend {
    fn get_item(&self, key: &str) -> cafe_finder_common::Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> cafe_finder_common::Result<()> {
        let mut items = self.items.clone();
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)?;
        self.items = items;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> cafe_finder_common::Result<()> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.clone();
        items.remove(key);
        self.persist(&items)?;
        self.items = items;
        Ok(())
    }
}
