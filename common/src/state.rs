//! 選択・絞り込みの状態管理
//!
//! 検索結果の一覧、選択中の1件、名前フィルタ、高評価フィルタを保持する。
//! 表示中の一覧は (records, filter_query, top_rated_only) からの純粋な導出で、
//! 変更のたびにマーカーの表示/非表示を同じ導出で揃え直す。
//!
//! ## 元の挙動との差分
//! - 高評価フィルタ解除時も名前フィルタを適用したままにする
//!   （以前は全マーカーを無条件に表示していた）
//! - 「一致なし」フラグは高評価フィルタに関係なく全件で判定する（以前と同じ）

use crate::config::AppConfig;
use crate::detail::{DetailInfo, UNKNOWN};
use crate::error::{Error, Result};
use crate::filter::{matches_query, normalize_query};
use crate::ordering::sort_by_name;
use crate::presenter::MarkerPresenter;
use crate::record::PlaceRecord;
use crate::report::ErrorReporter;
use crate::status::PlacesStatus;
use crate::store::{AnnotationStore, KeyValueBackend};
use crate::types::{LatLng, PlaceDetails, PlaceResult};
use tracing::{debug, info};

/// 詳細情報の取得依頼
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub place_id: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    config: AppConfig,
    records: Vec<PlaceRecord>,
    /// records 内の高評価店舗の位置（昇順）
    top_rated: Vec<usize>,
    filter_query: String,
    top_rated_only: bool,
    selected: Option<usize>,
    previously_selected: Option<usize>,
    no_match: bool,
    viewport_width: u32,
    editing: Option<usize>,
}

impl AppState {
    /// 検索結果から状態を作る
    ///
    /// 名前順に並べ、高評価店舗を抽出し、各店舗のメモをストアから読み込む。
    pub fn initialize<B: KeyValueBackend>(
        results: Vec<PlaceResult>,
        store: &AnnotationStore<B>,
        config: AppConfig,
    ) -> Result<Self> {
        let mut records = Vec::with_capacity(results.len());
        for result in sort_by_name(results) {
            let mut record = PlaceRecord::new(result, config.top_rated_min);
            record.annotation = store.get(record.annotation_key())?;
            records.push(record);
        }

        let top_rated = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_top_rated)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        info!(
            total = records.len(),
            top_rated = top_rated.len(),
            "place records initialized"
        );

        Ok(Self {
            config,
            records,
            top_rated,
            filter_query: String::new(),
            top_rated_only: false,
            selected: None,
            previously_selected: None,
            no_match: false,
            viewport_width: u32::MAX,
            editing: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&PlaceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn top_rated_records(&self) -> Vec<&PlaceRecord> {
        self.top_rated.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn top_rated_only(&self) -> bool {
        self.top_rated_only
    }

    pub fn no_match(&self) -> bool {
        self.no_match
    }

    pub fn selected(&self) -> Option<&PlaceRecord> {
        self.selected.map(|i| &self.records[i])
    }

    pub fn previously_selected(&self) -> Option<&PlaceRecord> {
        self.previously_selected.map(|i| &self.records[i])
    }

    /// メモ編集中の店舗
    pub fn editing_annotation(&self) -> Option<&PlaceRecord> {
        self.editing.map(|i| &self.records[i])
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// 狭い画面では選択中はリストを隠す
    pub fn list_panel_visible(&self) -> bool {
        !(self.config.is_narrow(self.viewport_width) && self.selected.is_some())
    }

    /// 先頭店舗の所在地から求めた地域名（住所の最後の区切り）
    pub fn locality(&self) -> String {
        self.records
            .first()
            .and_then(|r| r.vicinity.rsplit(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    /// 現在のフィルタで表示される店舗
    pub fn visible_records(&self) -> Vec<&PlaceRecord> {
        self.visible_indices()
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    fn visible_indices(&self) -> Vec<usize> {
        let query = normalize_query(&self.filter_query);
        let group: Box<dyn Iterator<Item = usize> + '_> = if self.top_rated_only {
            Box::new(self.top_rated.iter().copied())
        } else {
            Box::new(0..self.records.len())
        };
        group
            .filter(|&i| matches_query(&self.records[i].name, &query))
            .collect()
    }

    /// マーカーを作成し、全店舗が収まるように地図を合わせる
    pub fn attach(&self, presenter: &mut dyn MarkerPresenter) {
        for record in &self.records {
            presenter.create_marker(record);
        }
        let locations: Vec<LatLng> = self.records.iter().map(|r| r.location).collect();
        if !locations.is_empty() {
            presenter.fit_bounds(&locations);
        }
        self.refresh_markers(presenter);
    }

    pub fn set_filter_query(&mut self, text: &str, presenter: &mut dyn MarkerPresenter) {
        self.filter_query = text.to_string();

        let query = normalize_query(text);
        self.no_match =
            !query.is_empty() && !self.records.iter().any(|r| matches_query(&r.name, &query));

        debug!(query = %query, no_match = self.no_match, "filter query updated");
        self.refresh_markers(presenter);
    }

    pub fn toggle_top_rated_filter(&mut self, presenter: &mut dyn MarkerPresenter) {
        self.top_rated_only = !self.top_rated_only;
        debug!(on = self.top_rated_only, "top-rated filter toggled");
        self.refresh_markers(presenter);
    }

    fn refresh_markers(&self, presenter: &mut dyn MarkerPresenter) {
        let visible = self.visible_indices();
        for (i, record) in self.records.iter().enumerate() {
            if visible.binary_search(&i).is_ok() {
                presenter.show_marker(record);
            } else {
                presenter.hide_marker(record);
            }
        }
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::UnknownPlace(id.to_string()))
    }

    /// 店舗を選択する
    ///
    /// 別の店舗が選択中なら先に閉じる。詳細情報が未取得なら取得依頼を返す。
    pub fn select(
        &mut self,
        id: &str,
        presenter: &mut dyn MarkerPresenter,
    ) -> Result<Option<DetailRequest>> {
        let idx = self.index_of(id)?;

        if let Some(prev) = self.previously_selected {
            if prev != idx && self.records[prev].is_selected {
                self.records[prev].is_selected = false;
                presenter.deactivate(&self.records[prev]);
            }
        }
        if self.editing.is_some_and(|e| e != idx) {
            self.editing = None;
        }

        let record = &mut self.records[idx];
        record.is_selected = true;
        self.selected = Some(idx);
        self.previously_selected = Some(idx);
        debug!(id, name = %record.name, "place selected");

        let request = record.detail.is_none().then(|| DetailRequest {
            place_id: record.id.clone(),
        });

        let record = &self.records[idx];
        presenter.activate(record);
        presenter.center_on(record.location);

        Ok(request)
    }

    /// 選択を解除して詳細表示を閉じる
    pub fn deselect(&mut self, id: &str, presenter: &mut dyn MarkerPresenter) -> Result<()> {
        let idx = self.index_of(id)?;

        self.records[idx].is_selected = false;
        if self.selected == Some(idx) {
            self.selected = None;
        }
        if self.editing == Some(idx) {
            self.editing = None;
        }
        presenter.deactivate(&self.records[idx]);
        debug!(id, "place deselected");
        Ok(())
    }

    /// 詳細取得の結果を反映する
    ///
    /// 成功時は未取得の場合のみ反映する（最初の成功が残る）。
    /// 失敗時はエラーチャネルに報告し、未取得のまま再選択で再試行できる。
    pub fn apply_detail(
        &mut self,
        place_id: &str,
        outcome: std::result::Result<PlaceDetails, PlacesStatus>,
        reporter: &ErrorReporter,
    ) -> Result<()> {
        let idx = self.index_of(place_id)?;

        match outcome {
            Ok(details) => {
                let record = &mut self.records[idx];
                if record.detail.is_some() {
                    debug!(place_id, "detail already loaded, ignoring late response");
                    return Ok(());
                }
                record.detail = Some(DetailInfo::from_details(&details, &self.config));
                debug!(place_id, "detail loaded");
                Ok(())
            }
            Err(status) => {
                reporter.report(status.clone());
                Err(Error::Request(status))
            }
        }
    }

    /// メモ編集を開始する
    pub fn begin_annotation(&mut self, id: &str) -> Result<()> {
        self.editing = Some(self.index_of(id)?);
        Ok(())
    }

    pub fn cancel_annotation(&mut self) {
        self.editing = None;
    }

    /// メモを保存する（空なら削除）
    ///
    /// 同名の店舗はキーを共有するため、すべて同じメモになる。
    pub fn save_annotation<B: KeyValueBackend>(
        &mut self,
        id: &str,
        text: &str,
        store: &mut AnnotationStore<B>,
    ) -> Result<()> {
        let idx = self.index_of(id)?;
        let key = self.records[idx].annotation_key().to_string();

        store.set(&key, text)?;

        let annotation = (!text.trim().is_empty()).then(|| text.to_string());
        for record in self.records.iter_mut().filter(|r| r.name == key) {
            record.annotation = annotation.clone();
        }
        self.editing = None;
        Ok(())
    }
}
