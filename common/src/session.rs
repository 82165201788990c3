//! セッションの開始と詳細情報の読み込み
//!
//! 現在地の取得 → 周辺検索 → 並び替え → 状態の初期化 までの流れ。
//! 外部サービスはトレイト越しに呼び出す（ブラウザではJSブリッジ、CLIではHTTP）。
//! どの失敗も再試行せず、エラーチャネルに報告してそのまま返す。

use crate::config::{AppConfig, PhotoSize};
use crate::error::{Error, Result};
use crate::report::ErrorReporter;
use crate::state::{AppState, DetailRequest};
use crate::status::{EnvironmentError, PlacesStatus};
use crate::store::{AnnotationStore, KeyValueBackend};
use crate::types::{LatLng, NearbyRequest, PlaceDetails, PlaceResult};
use tracing::info;

/// 位置情報サービス
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    fn is_available(&self) -> bool;
    fn is_online(&self) -> bool;
    async fn current_position(&self) -> std::result::Result<LatLng, EnvironmentError>;
}

/// Places 検索/詳細サービス
#[allow(async_fn_in_trait)]
pub trait PlacesService {
    async fn nearby_search(
        &self,
        request: &NearbyRequest,
    ) -> std::result::Result<Vec<PlaceResult>, PlacesStatus>;

    /// 写真URLは photo_size に合わせて解決して返す
    async fn get_details(
        &self,
        place_id: &str,
        photo_size: PhotoSize,
    ) -> std::result::Result<PlaceDetails, PlacesStatus>;
}

fn fail(reporter: &ErrorReporter, err: Error) -> Error {
    reporter.report(&err);
    err
}

/// 現在地周辺のカフェを検索して状態を作る
pub async fn start_session<G, P, B>(
    geolocator: &G,
    places: &P,
    store: &AnnotationStore<B>,
    config: AppConfig,
    reporter: &ErrorReporter,
) -> Result<AppState>
where
    G: Geolocator,
    P: PlacesService,
    B: KeyValueBackend,
{
    if config.fixed_location.is_none() && !geolocator.is_available() {
        return Err(fail(reporter, EnvironmentError::Unsupported.into()));
    }
    if !geolocator.is_online() {
        return Err(fail(reporter, EnvironmentError::Offline.into()));
    }

    let location = match config.fixed_location {
        Some(location) => location,
        None => geolocator
            .current_position()
            .await
            .map_err(|e| fail(reporter, e.into()))?,
    };
    info!(lat = location.lat, lng = location.lng, "searching nearby cafes");

    let request = config.search.request_at(location);
    let results = places
        .nearby_search(&request)
        .await
        .map_err(|status| fail(reporter, status.into()))?;

    AppState::initialize(results, store, config).map_err(|e| fail(reporter, e))
}

/// 取得依頼に従って詳細情報を読み込み、状態に反映する
pub async fn load_detail<P: PlacesService>(
    state: &mut AppState,
    request: DetailRequest,
    places: &P,
    reporter: &ErrorReporter,
) -> Result<()> {
    let outcome = places
        .get_details(&request.place_id, state.config().photo_size)
        .await;
    state.apply_detail(&request.place_id, outcome, reporter)
}
