use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cafe-finder")]
#[command(about = "近くのカフェを検索・絞り込み・メモ管理するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 指定地点の周辺カフェを検索
    Search {
        /// 緯度（省略時は設定の固定座標）
        #[arg(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,

        /// 経度
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,

        /// 店名フィルタ
        #[arg(short, long)]
        filter: Option<String>,

        /// 高評価の店舗のみ
        #[arg(short, long)]
        top_rated: bool,

        /// 検索結果（生データ）をJSONに保存
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// 保存済みの検索結果を一覧表示
    List {
        /// 検索結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 店名フィルタ
        #[arg(short, long)]
        filter: Option<String>,

        /// 高評価の店舗のみ
        #[arg(short, long)]
        top_rated: bool,
    },

    /// 店舗の詳細情報を取得
    Detail {
        /// place_id
        #[arg(required = true)]
        place_id: String,
    },

    /// 店舗メモの管理
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// 設定管理
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// メモを保存（本文省略時は対話入力、空なら削除）
    Set {
        /// 店名
        name: String,
        /// メモ本文
        text: Option<String>,
    },
    /// メモを表示
    Show { name: String },
    /// メモを削除
    Clear { name: String },
    /// メモのある店舗を一覧
    List,
}
