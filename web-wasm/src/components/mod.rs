//! UIコンポーネント

pub mod detail_modal;
pub mod error_banner;
pub mod header;
pub mod place_list;
