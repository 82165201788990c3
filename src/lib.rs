//! Cafe Finder CLI
//!
//! Places Web Service を使って共通ライブラリの状態管理を端末から操作する。

pub mod annotations;
pub mod cli;
pub mod config;
pub mod error;
pub mod places_client;
pub mod render;
