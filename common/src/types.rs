//! Places APIとやり取りする型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - PlaceResult: 周辺検索（nearbySearch）の1件分
//! - PlaceDetails: 詳細検索（getDetails）の応答。写真URLは取得側で解決済み
//! - NearbyRequest: 周辺検索の条件

use serde::{Deserialize, Serialize};

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// 周辺検索の結果1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: String,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl PlaceResult {
    pub fn location(&self) -> LatLng {
        self.geometry.location
    }
}

/// 周辺検索リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRequest {
    pub location: LatLng,
    /// 検索半径（メートル）
    pub radius: u32,
    pub types: Vec<String>,
    pub keyword: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub text: String,
}

/// 詳細検索の応答
///
/// どのフィールドも欠落しうる。欠落は詳細情報の組み立て時に
/// 「不明」として扱われ、エラーにはならない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    /// 指定サイズに解決済みの写真URL
    pub photos: Vec<String>,
    pub address_components: Option<Vec<AddressComponent>>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub price_level: Option<u8>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub opening_hours: Option<OpeningHours>,
    pub reviews: Option<Vec<Review>>,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_result_deserialize_places_json() {
        let json = r#"{
            "place_id": "ChIJ123",
            "name": "Blue Bottle",
            "vicinity": "66 Mint St, San Francisco",
            "geometry": { "location": { "lat": 37.78, "lng": -122.40 } },
            "rating": 4.6,
            "types": ["cafe"]
        }"#;

        let place: PlaceResult = serde_json::from_str(json).expect("パース失敗");
        assert_eq!(place.place_id, "ChIJ123");
        assert_eq!(place.name, "Blue Bottle");
        assert_eq!(place.location(), LatLng::new(37.78, -122.40));
        assert_eq!(place.rating, Some(4.6));
    }

    #[test]
    fn test_place_result_without_rating() {
        let json = r#"{"place_id": "x", "name": "No Stars"}"#;
        let place: PlaceResult = serde_json::from_str(json).expect("パース失敗");
        assert_eq!(place.rating, None);
        assert_eq!(place.vicinity, "");
    }

    #[test]
    fn test_place_details_all_missing() {
        let details: PlaceDetails = serde_json::from_str("{}").expect("パース失敗");
        assert!(details.photos.is_empty());
        assert!(details.rating.is_none());
        assert!(details.opening_hours.is_none());
    }
}
