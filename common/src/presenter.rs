//! 地図マーカー表示アダプタ
//!
//! 状態の変化をマーカー操作に変換する境界。実際の描画は実装側
//! （ブラウザでは Google Maps JS ブリッジ）が担う。

use crate::record::PlaceRecord;
use crate::types::LatLng;

pub trait MarkerPresenter {
    /// マーカーを作成する（高評価の店舗は星付きピン）
    fn create_marker(&mut self, record: &PlaceRecord);
    fn show_marker(&mut self, record: &PlaceRecord);
    fn hide_marker(&mut self, record: &PlaceRecord);
    /// 一定時間バウンスさせて情報ウィンドウを開く
    fn activate(&mut self, record: &PlaceRecord);
    /// アニメーションを止めて情報ウィンドウを閉じる
    fn deactivate(&mut self, record: &PlaceRecord);
    fn center_on(&mut self, location: LatLng);
    fn fit_bounds(&mut self, locations: &[LatLng]);
}

/// 何もしない実装（CLIなど地図のない環境向け）
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl MarkerPresenter for NullPresenter {
    fn create_marker(&mut self, _record: &PlaceRecord) {}
    fn show_marker(&mut self, _record: &PlaceRecord) {}
    fn hide_marker(&mut self, _record: &PlaceRecord) {}
    fn activate(&mut self, _record: &PlaceRecord) {}
    fn deactivate(&mut self, _record: &PlaceRecord) {}
    fn center_on(&mut self, _location: LatLng) {}
    fn fit_bounds(&mut self, _locations: &[LatLng]) {}
}

/// 記録されたマーカー操作
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerEvent {
    Created { id: String, top_rated: bool },
    Shown(String),
    Hidden(String),
    Activated(String),
    Deactivated(String),
    Centered(LatLng),
    FitBounds(usize),
}

/// 操作を順番に記録する実装
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub events: Vec<MarkerEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// 最後に表示/非表示が指示された状態から、表示中のIDを求める
    pub fn shown_ids(&self) -> Vec<String> {
        let mut shown: Vec<String> = Vec::new();
        for event in &self.events {
            match event {
                MarkerEvent::Created { id, .. } | MarkerEvent::Shown(id) => {
                    if !shown.contains(id) {
                        shown.push(id.clone());
                    }
                }
                MarkerEvent::Hidden(id) => shown.retain(|s| s != id),
                _ => {}
            }
        }
        shown.sort();
        shown
    }
}

impl MarkerPresenter for RecordingPresenter {
    fn create_marker(&mut self, record: &PlaceRecord) {
        self.events.push(MarkerEvent::Created {
            id: record.id.clone(),
            top_rated: record.is_top_rated,
        });
    }

    fn show_marker(&mut self, record: &PlaceRecord) {
        self.events.push(MarkerEvent::Shown(record.id.clone()));
    }

    fn hide_marker(&mut self, record: &PlaceRecord) {
        self.events.push(MarkerEvent::Hidden(record.id.clone()));
    }

    fn activate(&mut self, record: &PlaceRecord) {
        self.events.push(MarkerEvent::Activated(record.id.clone()));
    }

    fn deactivate(&mut self, record: &PlaceRecord) {
        self.events.push(MarkerEvent::Deactivated(record.id.clone()));
    }

    fn center_on(&mut self, location: LatLng) {
        self.events.push(MarkerEvent::Centered(location));
    }

    fn fit_bounds(&mut self, locations: &[LatLng]) {
        self.events.push(MarkerEvent::FitBounds(locations.len()));
    }
}
