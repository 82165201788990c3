use cafe_finder::{annotations, cli, config, error, places_client, render};
use cafe_finder_common::{
    start_session, AnnotationStore, AppState, DetailInfo, ErrorReporter, LatLng, NullPresenter,
    PlaceResult, PlacesService,
};
use clap::Parser;
use cli::{Cli, Commands, NoteAction};
use config::Config;
use error::{CafeFinderError, Result};
use places_client::{FixedLocation, PlacesClient};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

type FileStore = AnnotationStore<annotations::JsonFileBackend>;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn open_store() -> Result<FileStore> {
    let path = Config::config_dir()?.join(annotations::ANNOTATIONS_FILE_NAME);
    Ok(AnnotationStore::new(annotations::JsonFileBackend::open(&path)?))
}

fn apply_filters(state: &mut AppState, filter: Option<&str>, top_rated: bool) {
    let mut presenter = NullPresenter;
    if let Some(query) = filter {
        state.set_filter_query(query, &mut presenter);
    }
    if top_rated {
        state.toggle_top_rated_filter(&mut presenter);
    }
}

fn spinner(message: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;
    let reporter = ErrorReporter::new();

    match cli.command {
        Commands::Search { lat, lng, filter, top_rated, save } => {
            let client = PlacesClient::new(config.get_api_key()?);
            let mut app = config.app.clone();
            if let (Some(lat), Some(lng)) = (lat, lng) {
                app.fixed_location = Some(LatLng::new(lat, lng));
            }
            if app.fixed_location.is_none() {
                return Err(CafeFinderError::MissingLocation);
            }
            let geolocator = FixedLocation(app.fixed_location);
            let store = open_store()?;

            let pb = spinner("周辺のカフェを検索中...");
            let session = start_session(&geolocator, &client, &store, app, &reporter).await;
            pb.finish_and_clear();
            let mut state = session?;

            if let Some(path) = save {
                let results: Vec<PlaceResult> =
                    state.records().iter().map(|r| r.to_result()).collect();
                std::fs::write(&path, serde_json::to_string_pretty(&results)?)?;
                println!("✔ 検索結果を保存: {}", path.display());
            }

            apply_filters(&mut state, filter.as_deref(), top_rated);
            println!("{}", render::visible_list(&state));
        }

        Commands::List { input, filter, top_rated } => {
            if !input.exists() {
                return Err(CafeFinderError::FileNotFound(input.display().to_string()));
            }
            let content = std::fs::read_to_string(&input)?;
            let results: Vec<PlaceResult> = serde_json::from_str(&content)?;
            let store = open_store()?;

            let mut state = AppState::initialize(results, &store, config.app.clone())?;
            apply_filters(&mut state, filter.as_deref(), top_rated);
            println!("{}", render::visible_list(&state));
        }

        Commands::Detail { place_id } => {
            let client = PlacesClient::new(config.get_api_key()?);

            let pb = spinner("詳細情報を取得中...");
            let outcome = client.get_details(&place_id, config.app.photo_size).await;
            pb.finish_and_clear();

            match outcome {
                Ok(details) => {
                    let info = DetailInfo::from_details(&details, &config.app);
                    let name = details.name.as_deref().unwrap_or(&place_id);
                    println!("{}", render::detail_block(name, &info));
                }
                Err(status) => {
                    reporter.report(status.clone());
                    return Err(cafe_finder_common::Error::Request(status).into());
                }
            }
        }

        Commands::Note { action } => {
            let mut store = open_store()?;
            match action {
                NoteAction::Set { name, text } => {
                    let text = match text {
                        Some(text) => text,
                        None => dialoguer::Input::<String>::new()
                            .with_prompt(format!("{} のメモ（空で削除）", name))
                            .allow_empty(true)
                            .interact_text()?,
                    };
                    store.set(&name, &text)?;
                    if text.trim().is_empty() {
                        println!("✔ メモを削除しました: {}", name);
                    } else {
                        println!("✔ メモを保存しました: {}", name);
                    }
                }
                NoteAction::Show { name } => {
                    match store.get(&name)? {
                        Some(text) => println!("{}", text),
                        None => println!("メモはありません: {}", name),
                    }
                }
                NoteAction::Clear { name } => {
                    store.delete(&name)?;
                    println!("✔ メモを削除しました: {}", name);
                }
                NoteAction::List => {
                    let keys = store.known_keys()?;
                    if keys.is_empty() {
                        println!("メモはありません");
                    }
                    for key in keys {
                        let text = store.get(&key)?.unwrap_or_default();
                        println!("{}: {}", key, text);
                    }
                }
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  検索半径: {}m", config.app.search.radius_m);
                println!("  種別: {}", config.app.search.categories.join(", "));
                println!("  キーワード: {}", config.app.search.keyword);
                println!("  高評価の基準: {}", config.app.top_rated_min);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
