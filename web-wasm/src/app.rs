//! メインアプリケーションコンポーネント
//!
//! 状態は `AppState` 1つにまとめ、シグナルに載せる。マーカー操作は
//! 呼び出しごとに JsMarkerPresenter を作って渡す。

use crate::components::{
    detail_modal::DetailModal, error_banner::ErrorBanner, header::Header, place_list::PlaceList,
};
use crate::maps_bridge::{load_maps, BrowserGeolocator, BrowserPlaces, JsMarkerPresenter};
use crate::storage;
use cafe_finder_common::{
    start_session, AppConfig, AppState, Banner, DetailRequest, ErrorReporter, PlaceRecord,
    PlacesService,
};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ビルド時に埋め込む Maps API キー
const API_KEY: Option<&str> = option_env!("GOOGLE_MAPS_API_KEY");
const MAP_ELEMENT_ID: &str = "map";

/// エラーバナーへの表示
#[derive(Clone, Copy)]
struct SignalBanner(WriteSignal<Option<String>>);

impl Banner for SignalBanner {
    fn show(&self, text: &str) {
        self.0.set(Some(text.to_string()));
    }
}

fn viewport_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map_or(u32::MAX, |w| w as u32)
}

fn app_config() -> AppConfig {
    let mut config = AppConfig::default();
    // 開発ビルドは位置情報を使わず固定地点で検索する
    if cfg!(debug_assertions) {
        config.fixed_location = Some(AppConfig::development_location());
    }
    config
}

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(None::<AppState>);
    let (banner, set_banner) = signal(None::<String>);
    let config = app_config();
    let bounce_ms = config.marker_bounce_ms;
    let photo_size = config.photo_size;

    let reporter = move || ErrorReporter::with_banner(SignalBanner(set_banner));
    let presenter = move || JsMarkerPresenter::new(bounce_ms);

    // 詳細情報は初回選択時に一度だけ取得する
    let fetch_detail = move |request: DetailRequest| {
        spawn_local(async move {
            let outcome = BrowserPlaces
                .get_details(&request.place_id, photo_size)
                .await;
            let reporter = reporter();
            state.update(|slot| {
                if let Some(app) = slot.as_mut() {
                    // 失敗は報告済み。再選択で再試行される
                    let _ = app.apply_detail(&request.place_id, outcome, &reporter);
                }
            });
        });
    };

    let on_select = Callback::new(move |id: String| {
        let mut presenter = presenter();
        let outcome = state
            .try_update(|slot| slot.as_mut().map(|app| app.select(&id, &mut presenter)))
            .flatten();
        match outcome {
            Some(Ok(Some(request))) => fetch_detail(request),
            Some(Err(e)) => {
                reporter().report(&e);
            }
            _ => {}
        }
    });

    let on_deselect = Callback::new(move |id: String| {
        let mut presenter = presenter();
        let outcome = state
            .try_update(|slot| slot.as_mut().map(|app| app.deselect(&id, &mut presenter)))
            .flatten();
        if let Some(Err(e)) = outcome {
            reporter().report(&e);
        }
    });

    let on_filter = Callback::new(move |text: String| {
        let mut presenter = presenter();
        state.update(|slot| {
            if let Some(app) = slot.as_mut() {
                app.set_filter_query(&text, &mut presenter);
            }
        });
    });

    let on_toggle_top_rated = Callback::new(move |_: ()| {
        let mut presenter = presenter();
        state.update(|slot| {
            if let Some(app) = slot.as_mut() {
                app.toggle_top_rated_filter(&mut presenter);
            }
        });
    });

    let on_edit_annotation = Callback::new(move |id: String| {
        let outcome = state
            .try_update(|slot| slot.as_mut().map(|app| app.begin_annotation(&id)))
            .flatten();
        if let Some(Err(e)) = outcome {
            reporter().report(&e);
        }
    });

    let on_cancel_annotation = Callback::new(move |_: ()| {
        state.update(|slot| {
            if let Some(app) = slot.as_mut() {
                app.cancel_annotation();
            }
        });
    });

    let on_save_annotation = Callback::new(move |(id, text): (String, String)| {
        let mut store = storage::annotation_store();
        let outcome = state
            .try_update(|slot| {
                slot.as_mut()
                    .map(|app| app.save_annotation(&id, &text, &mut store))
            })
            .flatten();
        if let Some(Err(e)) = outcome {
            reporter().report(&e);
        }
    });

    // 起動: 地図を読み込み、現在地周辺を検索してマーカーを置く
    Effect::new(move |_| {
        let config = app_config();
        spawn_local(async move {
            let reporter = reporter();
            let Some(api_key) = API_KEY else {
                reporter.report("Google Maps API key is not configured");
                return;
            };
            if let Err(message) = load_maps(api_key, MAP_ELEMENT_ID, config.default_zoom).await {
                reporter.report(message);
                return;
            }

            let store = storage::annotation_store();
            // 失敗は start_session 内で報告済み
            if let Ok(mut app) =
                start_session(&BrowserGeolocator, &BrowserPlaces, &store, config, &reporter).await
            {
                app.set_viewport_width(viewport_width());
                let mut presenter = presenter().with_callbacks(on_select, on_deselect);
                app.attach(&mut presenter);
                state.set(Some(app));
            }
        });
    });

    let _ = window_event_listener(ev::resize, move |_| {
        let width = viewport_width();
        state.update(|slot| {
            if let Some(app) = slot.as_mut() {
                app.set_viewport_width(width);
            }
        });
    });

    let locality = Signal::derive(move || {
        state.with(|slot| slot.as_ref().map(|app| app.locality()).unwrap_or_default())
    });
    let filter_query = Signal::derive(move || {
        state.with(|slot| {
            slot.as_ref()
                .map(|app| app.filter_query().to_string())
                .unwrap_or_default()
        })
    });
    let top_rated_only =
        Signal::derive(move || state.with(|slot| slot.as_ref().is_some_and(|app| app.top_rated_only())));
    let visible = Signal::derive(move || {
        state.with(|slot| {
            slot.as_ref()
                .map(|app| app.visible_records().into_iter().cloned().collect::<Vec<PlaceRecord>>())
                .unwrap_or_default()
        })
    });
    let no_match =
        Signal::derive(move || state.with(|slot| slot.as_ref().is_some_and(|app| app.no_match())));
    let list_visible = Signal::derive(move || {
        state.with(|slot| slot.as_ref().map_or(true, |app| app.list_panel_visible()))
    });
    let selected = Signal::derive(move || {
        state.with(|slot| slot.as_ref().and_then(|app| app.selected().cloned()))
    });
    let editing = Signal::derive(move || {
        state.with(|slot| {
            slot.as_ref()
                .and_then(|app| app.editing_annotation().map(|r| r.id.clone()))
        })
    });

    view! {
        <div class="container">
            <ErrorBanner message=banner on_dismiss=Callback::new(move |_: ()| set_banner.set(None)) />

            <Header
                locality=locality
                filter_query=filter_query
                top_rated_only=top_rated_only
                on_filter=on_filter
                on_toggle_top_rated=on_toggle_top_rated
            />

            <main class="content">
                <Show when=move || list_visible.get()>
                    <PlaceList records=visible no_match=no_match on_select=on_select />
                </Show>
                <div id=MAP_ELEMENT_ID class="map"></div>
            </main>

            <DetailModal
                selected=selected
                editing=editing
                on_close=on_deselect
                on_edit=on_edit_annotation
                on_cancel=on_cancel_annotation
                on_save=on_save_annotation
            />
        </div>
    }
}
