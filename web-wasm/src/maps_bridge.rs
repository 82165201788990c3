//! Google Maps JavaScript API ブリッジ
//!
//! 地図・マーカー・Places サービスは JS 側（js/maps-bridge.js）が保持し、
//! Rust からは place_id をキーに操作する。

use cafe_finder_common::{
    EnvironmentError, Geolocator, LatLng, MarkerPresenter, NearbyRequest, PhotoSize,
    PlaceDetails, PlaceRecord, PlaceResult, PlacesService, PlacesStatus,
};
use leptos::prelude::*;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(module = "/js/maps-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = "loadMaps", catch)]
    async fn load_maps_js(api_key: &str, element_id: &str, zoom: u8) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "geolocationAvailable")]
    fn geolocation_available_js() -> bool;

    #[wasm_bindgen(js_name = "getCurrentPosition", catch)]
    async fn get_current_position_js() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "nearbySearch", catch)]
    async fn nearby_search_js(request: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "getDetails", catch)]
    async fn get_details_js(place_id: &str, max_width: u32, max_height: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "createMarker")]
    fn create_marker_js(
        id: &str,
        title: &str,
        lat: f64,
        lng: f64,
        top_rated: bool,
        on_click: &js_sys::Function,
        on_close: &js_sys::Function,
    );

    #[wasm_bindgen(js_name = "setMarkerVisible")]
    fn set_marker_visible_js(id: &str, visible: bool);

    #[wasm_bindgen(js_name = "activateMarker")]
    fn activate_marker_js(id: &str, bounce_ms: u32);

    #[wasm_bindgen(js_name = "deactivateMarker")]
    fn deactivate_marker_js(id: &str);

    #[wasm_bindgen(js_name = "panTo")]
    fn pan_to_js(lat: f64, lng: f64);

    #[wasm_bindgen(js_name = "fitBounds")]
    fn fit_bounds_js(points: JsValue);
}

/// Maps スクリプトを読み込み、地図を作成する
pub async fn load_maps(api_key: &str, element_id: &str, zoom: u8) -> Result<(), String> {
    load_maps_js(api_key, element_id, zoom)
        .await
        .map(|_| ())
        .map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

#[derive(Deserialize)]
struct NearbyReply {
    status: PlacesStatus,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Deserialize)]
struct DetailsReply {
    status: PlacesStatus,
    #[serde(default)]
    place: Option<PlaceDetails>,
}

/// ブラウザの位置情報
#[derive(Clone, Copy, Default)]
pub struct BrowserGeolocator;

impl Geolocator for BrowserGeolocator {
    fn is_available(&self) -> bool {
        geolocation_available_js()
    }

    fn is_online(&self) -> bool {
        web_sys::window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(false)
    }

    async fn current_position(&self) -> Result<LatLng, EnvironmentError> {
        let value = get_current_position_js().await.map_err(|e| {
            e.as_string()
                .and_then(|code| EnvironmentError::from_code(&code))
                .unwrap_or(EnvironmentError::PositionUnavailable)
        })?;
        serde_wasm_bindgen::from_value(value).map_err(|_| EnvironmentError::LocationUnknown)
    }
}

/// google.maps.places.PlacesService 経由の検索
#[derive(Clone, Copy, Default)]
pub struct BrowserPlaces;

impl PlacesService for BrowserPlaces {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<Vec<PlaceResult>, PlacesStatus> {
        let request = serde_wasm_bindgen::to_value(request).map_err(|_| PlacesStatus::InvalidRequest)?;
        let value = nearby_search_js(request).await.map_err(|_| PlacesStatus::Error)?;
        let reply: NearbyReply = serde_wasm_bindgen::from_value(value).map_err(|e| {
            tracing::warn!("nearbySearch reply parse failed: {}", e);
            PlacesStatus::Error
        })?;

        if !reply.status.is_ok() {
            return Err(reply.status);
        }
        Ok(reply.results)
    }

    async fn get_details(
        &self,
        place_id: &str,
        photo_size: PhotoSize,
    ) -> Result<PlaceDetails, PlacesStatus> {
        let value = get_details_js(place_id, photo_size.max_width, photo_size.max_height)
            .await
            .map_err(|_| PlacesStatus::Error)?;
        let reply: DetailsReply = serde_wasm_bindgen::from_value(value).map_err(|e| {
            tracing::warn!("getDetails reply parse failed: {}", e);
            PlacesStatus::Error
        })?;

        if !reply.status.is_ok() {
            return Err(reply.status);
        }
        Ok(reply.place.unwrap_or_default())
    }
}

/// 地図マーカーへの反映
#[derive(Clone, Copy)]
pub struct JsMarkerPresenter {
    bounce_ms: u32,
    on_select: Option<Callback<String>>,
    on_close: Option<Callback<String>>,
}

impl JsMarkerPresenter {
    pub fn new(bounce_ms: u32) -> Self {
        Self {
            bounce_ms,
            on_select: None,
            on_close: None,
        }
    }

    /// マーカーのクリックと情報ウィンドウの閉じるボタンを状態に繋ぐ
    pub fn with_callbacks(mut self, on_select: Callback<String>, on_close: Callback<String>) -> Self {
        self.on_select = Some(on_select);
        self.on_close = Some(on_close);
        self
    }
}

fn id_callback(callback: Option<Callback<String>>, id: &str) -> Closure<dyn Fn()> {
    let id = id.to_string();
    Closure::new(move || {
        if let Some(callback) = callback {
            callback.run(id.clone());
        }
    })
}

impl MarkerPresenter for JsMarkerPresenter {
    fn create_marker(&mut self, record: &PlaceRecord) {
        let on_click = id_callback(self.on_select, &record.id);
        let on_close = id_callback(self.on_close, &record.id);
        create_marker_js(
            &record.id,
            &record.name,
            record.location.lat,
            record.location.lng,
            record.is_top_rated,
            on_click.as_ref().unchecked_ref(),
            on_close.as_ref().unchecked_ref(),
        );
        // マーカーはセッション中ずっと残る
        on_click.forget();
        on_close.forget();
    }

    fn show_marker(&mut self, record: &PlaceRecord) {
        set_marker_visible_js(&record.id, true);
    }

    fn hide_marker(&mut self, record: &PlaceRecord) {
        set_marker_visible_js(&record.id, false);
    }

    fn activate(&mut self, record: &PlaceRecord) {
        activate_marker_js(&record.id, self.bounce_ms);
    }

    fn deactivate(&mut self, record: &PlaceRecord) {
        deactivate_marker_js(&record.id);
    }

    fn center_on(&mut self, location: LatLng) {
        pan_to_js(location.lat, location.lng);
    }

    fn fit_bounds(&mut self, locations: &[LatLng]) {
        if let Ok(points) = serde_wasm_bindgen::to_value(locations) {
            fit_bounds_js(points);
        }
    }
}
