//! Places API ステータスと位置情報エラーの語彙
//!
//! どちらもエラーチャネルで人が読めるメッセージに変換される。

use serde::{Deserialize, Serialize};

/// Places検索/詳細リクエストのステータス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlacesStatus {
    Ok,
    Error,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    ZeroResults,
    NotFound,
    /// 語彙にないステータスコード
    Other(String),
}

impl PlacesStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "OK" => PlacesStatus::Ok,
            "ERROR" => PlacesStatus::Error,
            "INVALID_REQUEST" => PlacesStatus::InvalidRequest,
            "OVER_QUERY_LIMIT" => PlacesStatus::OverQueryLimit,
            "REQUEST_DENIED" => PlacesStatus::RequestDenied,
            "UNKNOWN_ERROR" => PlacesStatus::UnknownError,
            "ZERO_RESULTS" => PlacesStatus::ZeroResults,
            "NOT_FOUND" => PlacesStatus::NotFound,
            other => PlacesStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlacesStatus::Ok => "OK",
            PlacesStatus::Error => "ERROR",
            PlacesStatus::InvalidRequest => "INVALID_REQUEST",
            PlacesStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            PlacesStatus::RequestDenied => "REQUEST_DENIED",
            PlacesStatus::UnknownError => "UNKNOWN_ERROR",
            PlacesStatus::ZeroResults => "ZERO_RESULTS",
            PlacesStatus::NotFound => "NOT_FOUND",
            PlacesStatus::Other(code) => code,
        }
    }

    pub fn message(&self) -> String {
        let text = match self {
            PlacesStatus::Ok => "Successful connection to API service",
            PlacesStatus::Error => "There was a problem contacting Google servers",
            PlacesStatus::InvalidRequest => "This request was invalid",
            PlacesStatus::OverQueryLimit => "The webpage has gone over its request quota",
            PlacesStatus::RequestDenied => "The webpage is not allowed to use the PlacesService",
            PlacesStatus::UnknownError => {
                "The request could not be processed due to a server error. The request may succeed if you try again."
            }
            PlacesStatus::ZeroResults => "No nearby cafes detected.",
            PlacesStatus::NotFound => "The referenced place was not found.",
            PlacesStatus::Other(code) => return code.clone(),
        };
        text.to_string()
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, PlacesStatus::Ok)
    }
}

impl From<String> for PlacesStatus {
    fn from(code: String) -> Self {
        PlacesStatus::from_code(&code)
    }
}

impl From<PlacesStatus> for String {
    fn from(status: PlacesStatus) -> Self {
        status.as_str().to_string()
    }
}

/// 実行環境（位置情報・接続）に起因するエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentError {
    Unsupported,
    Offline,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    LocationUnknown,
}

impl EnvironmentError {
    /// ブラウザGeolocation APIのエラーコード名から変換
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PERMISSION_DENIED" => Some(EnvironmentError::PermissionDenied),
            "POSITION_UNAVAILABLE" => Some(EnvironmentError::PositionUnavailable),
            "TIMEOUT" => Some(EnvironmentError::Timeout),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EnvironmentError::Unsupported => "Browser does not support geolocation.",
            EnvironmentError::Offline => {
                "You appear to be offline. Please check your wifi settings."
            }
            EnvironmentError::PermissionDenied => "User denied the request for Geolocation.",
            EnvironmentError::PositionUnavailable => "Location information is unavailable.",
            EnvironmentError::Timeout => "The request to get user location timed out.",
            EnvironmentError::LocationUnknown => "Unable to get user location.",
        }
    }
}
