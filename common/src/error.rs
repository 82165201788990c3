//! エラー型定義

use crate::status::{EnvironmentError, PlacesStatus};
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Request error: {}", .0.message())]
    Request(PlacesStatus),

    #[error("Environment error: {}", .0.message())]
    Environment(EnvironmentError),

    #[error("Unknown place: {0}")]
    UnknownPlace(String),
}

impl From<PlacesStatus> for Error {
    fn from(status: PlacesStatus) -> Self {
        Error::Request(status)
    }
}

impl From<EnvironmentError> for Error {
    fn from(err: EnvironmentError) -> Self {
        Error::Environment(err)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
