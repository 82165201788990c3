use thiserror::Error;

#[derive(Error, Debug)]
pub enum CafeFinderError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`cafe-finder config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("現在地が分かりません。`--lat` と `--lng` で座標を指定してください")]
    MissingLocation,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] cafe_finder_common::Error),
}

pub type Result<T> = std::result::Result<T, CafeFinderError>;
