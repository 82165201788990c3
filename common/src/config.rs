//! アプリケーション設定
//!
//! すべてのフィールドにデフォルト値があり、部分的なJSONからも読み込める。

use crate::types::{LatLng, NearbyRequest};
use serde::{Deserialize, Serialize};

/// 写真が1枚もないときに表示する代替画像
pub const FALLBACK_PHOTO_URL: &str = "https://lh3.googleusercontent.com/_nFDV0pen9rXCLMAw0zyVxiG-xspV2EDK1xJ1RcMm1rn3RjWvh-DJHGuVD8YIs7TMxZLLQkHBSvsoGS3yBbnV4tQmJDVx-UXW-wvOKwOULfuIO-3QbFvt-K3oVUFIjYGT7vMSMLaWg=s300-no";

/// 周辺検索の条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub radius_m: u32,
    pub categories: Vec<String>,
    pub keyword: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: 1000,
            categories: vec!["cafe".into(), "bakery".into()],
            keyword: "coffee".into(),
        }
    }
}

impl SearchConfig {
    pub fn request_at(&self, location: LatLng) -> NearbyRequest {
        NearbyRequest {
            location,
            radius: self.radius_m,
            types: self.categories.clone(),
            keyword: self.keyword.clone(),
        }
    }
}

/// 写真の最大サイズ（px）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSize {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PhotoSize {
    fn default() -> Self {
        Self { max_width: 350, max_height: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub search: SearchConfig,
    /// これ未満の画面幅では選択中にリストを隠す
    pub narrow_viewport_px: u32,
    pub top_rated_min: f64,
    pub snippet_max_chars: usize,
    pub photo_size: PhotoSize,
    pub fallback_photo_url: String,
    pub marker_bounce_ms: u32,
    pub default_zoom: u8,
    /// 開発用: 現在地の代わりに使う固定座標
    pub fixed_location: Option<LatLng>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            narrow_viewport_px: 750,
            top_rated_min: 4.5,
            snippet_max_chars: 150,
            photo_size: PhotoSize::default(),
            fallback_photo_url: FALLBACK_PHOTO_URL.to_string(),
            marker_bounce_ms: 2800,
            default_zoom: 15,
            fixed_location: None,
        }
    }
}

impl AppConfig {
    /// 開発時に使っていたサンフランシスコ中心部の座標
    pub fn development_location() -> LatLng {
        LatLng::new(37.7833, -122.4167)
    }

    pub fn is_narrow(&self, viewport_width: u32) -> bool {
        viewport_width < self.narrow_viewport_px
    }
}
