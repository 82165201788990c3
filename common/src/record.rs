//! 検索結果1件分の表示状態

use crate::detail::DetailInfo;
use crate::types::{Geometry, LatLng, PlaceResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    /// Places API の place_id
    pub id: String,
    pub name: String,
    pub vicinity: String,
    pub location: LatLng,
    pub rating: Option<f64>,
    /// 作成時に一度だけ決まる
    pub is_top_rated: bool,
    /// ユーザーのメモ（名前をキーに保存）
    pub annotation: Option<String>,
    /// 初回選択時に一度だけ読み込まれる
    pub detail: Option<DetailInfo>,
    pub is_selected: bool,
}

impl PlaceRecord {
    pub fn new(result: PlaceResult, top_rated_min: f64) -> Self {
        let is_top_rated = result.rating.is_some_and(|r| r >= top_rated_min);
        let location = result.location();
        Self {
            id: result.place_id,
            name: result.name,
            vicinity: result.vicinity,
            location,
            rating: result.rating,
            is_top_rated,
            annotation: None,
            detail: None,
            is_selected: false,
        }
    }

    /// 検索結果の形に戻す（保存用）
    pub fn to_result(&self) -> PlaceResult {
        PlaceResult {
            place_id: self.id.clone(),
            name: self.name.clone(),
            vicinity: self.vicinity.clone(),
            geometry: Geometry {
                location: self.location,
            },
            rating: self.rating,
        }
    }

    pub fn has_annotation(&self) -> bool {
        self.annotation.is_some()
    }

    /// メモの保存キー（同名の店舗はメモを共有する）
    pub fn annotation_key(&self) -> &str {
        &self.name
    }
}
