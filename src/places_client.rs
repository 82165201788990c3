//! Places Web Service クライアント
//!
//! 周辺検索と詳細検索を HTTP で呼び出し、共通ライブラリの型に変換する。

use cafe_finder_common::{
    AddressComponent, LatLng, NearbyRequest, PhotoSize, PlaceDetails, PlaceResult,
    PlacesService, PlacesStatus, Review,
};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};

const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

const DETAIL_FIELDS: &str = "name,photos,address_components,formatted_phone_number,international_phone_number,website,price_level,rating,user_ratings_total,opening_hours,reviews,url";

/// 周辺検索のレスポンス
#[derive(Debug, Deserialize)]
pub struct NearbyResponse {
    pub status: PlacesStatus,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// 詳細検索のレスポンス
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: PlacesStatus,
    #[serde(default)]
    pub result: Option<RawDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDetails {
    pub name: Option<String>,
    pub photos: Option<Vec<RawPhoto>>,
    pub address_components: Option<Vec<AddressComponent>>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub price_level: Option<u8>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub opening_hours: Option<cafe_finder_common::types::OpeningHours>,
    pub reviews: Option<Vec<Review>>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPhoto {
    pub photo_reference: String,
}

pub struct PlacesClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: PLACES_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlacesStatus> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Places API呼び出し失敗: {}", e);
                PlacesStatus::Error
            })?;

        response.json::<T>().await.map_err(|e| {
            warn!("Places APIレスポンスのパースに失敗: {}", e);
            PlacesStatus::Error
        })
    }

    async fn nearby_for_type(
        &self,
        request: &NearbyRequest,
        place_type: Option<&str>,
    ) -> Result<Vec<PlaceResult>, PlacesStatus> {
        let mut query = vec![
            ("location", format!("{},{}", request.location.lat, request.location.lng)),
            ("radius", request.radius.to_string()),
            ("keyword", request.keyword.clone()),
        ];
        if let Some(place_type) = place_type {
            query.push(("type", place_type.to_string()));
        }

        let response: NearbyResponse = self.get_json("nearbysearch", &query).await?;
        into_results(response)
    }
}

/// ステータスがOKなら結果を返す
pub fn into_results(response: NearbyResponse) -> Result<Vec<PlaceResult>, PlacesStatus> {
    if !response.status.is_ok() {
        if let Some(message) = &response.error_message {
            warn!("{}", message);
        }
        return Err(response.status);
    }
    Ok(response.results)
}

/// ステータスがOKなら詳細に変換する。写真は指定サイズのURLに解決する
pub fn into_details(
    response: DetailsResponse,
    base_url: &str,
    api_key: &str,
    photo_size: PhotoSize,
) -> Result<PlaceDetails, PlacesStatus> {
    if !response.status.is_ok() {
        if let Some(message) = &response.error_message {
            warn!("{}", message);
        }
        return Err(response.status);
    }
    let raw = response.result.unwrap_or_default();

    let photos = raw
        .photos
        .unwrap_or_default()
        .into_iter()
        .map(|p| photo_url(base_url, api_key, &p.photo_reference, photo_size))
        .collect();

    Ok(PlaceDetails {
        name: raw.name,
        photos,
        address_components: raw.address_components,
        formatted_phone_number: raw.formatted_phone_number,
        international_phone_number: raw.international_phone_number,
        website: raw.website,
        price_level: raw.price_level,
        rating: raw.rating,
        user_ratings_total: raw.user_ratings_total,
        opening_hours: raw.opening_hours,
        reviews: raw.reviews,
        url: raw.url,
    })
}

pub fn photo_url(base_url: &str, api_key: &str, reference: &str, size: PhotoSize) -> String {
    format!(
        "{}/photo?maxwidth={}&maxheight={}&photo_reference={}&key={}",
        base_url, size.max_width, size.max_height, reference, api_key
    )
}

/// 種別ごとの結果を place_id で重複除去して結合する
///
/// どの種別も ZERO_RESULTS なら ZERO_RESULTS、それ以外の失敗は最初のものを返す。
pub fn merge_by_type(
    outcomes: Vec<Result<Vec<PlaceResult>, PlacesStatus>>,
) -> Result<Vec<PlaceResult>, PlacesStatus> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(results) => {
                for result in results {
                    if seen.insert(result.place_id.clone()) {
                        merged.push(result);
                    }
                }
            }
            Err(PlacesStatus::ZeroResults) => {}
            Err(status) => return Err(status),
        }
    }

    if merged.is_empty() {
        return Err(PlacesStatus::ZeroResults);
    }
    Ok(merged)
}

impl PlacesService for PlacesClient {
    async fn nearby_search(
        &self,
        request: &NearbyRequest,
    ) -> Result<Vec<PlaceResult>, PlacesStatus> {
        if request.types.is_empty() {
            return self.nearby_for_type(request, None).await;
        }

        // Web Service は種別を1つしか受け付けないため、種別ごとに順番に検索する
        let mut outcomes = Vec::with_capacity(request.types.len());
        for place_type in &request.types {
            debug!(place_type, "nearby search");
            outcomes.push(self.nearby_for_type(request, Some(place_type)).await);
        }
        merge_by_type(outcomes)
    }

    async fn get_details(
        &self,
        place_id: &str,
        photo_size: PhotoSize,
    ) -> Result<PlaceDetails, PlacesStatus> {
        let query = [
            ("place_id", place_id.to_string()),
            ("fields", DETAIL_FIELDS.to_string()),
        ];
        let response: DetailsResponse = self.get_json("details", &query).await?;
        into_details(response, &self.base_url, &self.api_key, photo_size)
    }
}

/// 固定座標を返す位置情報サービス（CLIの --lat/--lng 用）
///
/// 座標がなければ位置不明として失敗する。
pub struct FixedLocation(pub Option<LatLng>);

impl cafe_finder_common::Geolocator for FixedLocation {
    fn is_available(&self) -> bool {
        true
    }

    fn is_online(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<LatLng, cafe_finder_common::EnvironmentError> {
        self.0
            .ok_or(cafe_finder_common::EnvironmentError::LocationUnknown)
    }
}
