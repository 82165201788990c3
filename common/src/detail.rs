//! 詳細情報の組み立て
//!
//! 詳細検索の応答からモーダル表示用の DetailInfo を作る。
//! 欠落フィールドは UNKNOWN に置き換え、操作全体は失敗させない。

use crate::config::AppConfig;
use crate::types::{AddressComponent, PlaceDetails};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 値が得られなかったフィールドの表示
pub const UNKNOWN: &str = "?";

const ELLIPSIS: &str = "...";
const MORE_DETAILS_TEXT: &str = "View more details";
const NO_REVIEW_TEXT: &str = "No comments or link available.";

/// 営業状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenStatus {
    Open,
    Closed,
    Unknown,
}

impl OpenStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OpenStatus::Open => "Now Open",
            OpenStatus::Closed => "Now Closed",
            OpenStatus::Unknown => UNKNOWN,
        }
    }
}

/// 詳細表示用の情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailInfo {
    /// 空にはならない（写真がなければ代替画像1枚）
    pub photos: Vec<String>,
    pub address_line1: String,
    pub address_line2: String,
    pub phone: String,
    pub homepage: String,
    /// 価格帯（"$" の繰り返し）または UNKNOWN
    pub price: String,
    pub rating_text: String,
    pub open_status: OpenStatus,
    pub review_snippet: String,
    pub review_url: Option<String>,
}

impl DetailInfo {
    pub fn from_details(details: &PlaceDetails, config: &AppConfig) -> Self {
        let name = details.name.as_deref().unwrap_or(UNKNOWN);

        let photos = if details.photos.is_empty() {
            warn!("No photos for {}", name);
            vec![config.fallback_photo_url.clone()]
        } else {
            details.photos.clone()
        };

        let (address_line1, address_line2) = match &details.address_components {
            Some(components) => address_lines(components),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };

        let phone = details
            .formatted_phone_number
            .as_ref()
            .or(details.international_phone_number.as_ref())
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());

        let homepage = details
            .website
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string());

        let price = details
            .price_level
            .map(price_glyphs)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let rating_text = rating_text(details.rating, details.user_ratings_total);

        let open_status = match details.opening_hours.as_ref().and_then(|h| h.open_now) {
            Some(true) => OpenStatus::Open,
            Some(false) => OpenStatus::Closed,
            None => OpenStatus::Unknown,
        };

        let first_review = details.reviews.as_ref().and_then(|r| r.first());
        let (review_snippet, review_url) = match (first_review, &details.url) {
            (Some(review), url) => (
                truncate_snippet(&review.text, config.snippet_max_chars),
                url.clone(),
            ),
            (None, Some(url)) => (MORE_DETAILS_TEXT.to_string(), Some(url.clone())),
            (None, None) => (NO_REVIEW_TEXT.to_string(), None),
        };

        Self {
            photos,
            address_line1,
            address_line2,
            phone,
            homepage,
            price,
            rating_text,
            open_status,
            review_snippet,
            review_url,
        }
    }

    /// リンクにできるホームページURL（不明なら None）
    pub fn homepage_url(&self) -> Option<&str> {
        (self.homepage != UNKNOWN).then_some(self.homepage.as_str())
    }
}

fn address_lines(components: &[AddressComponent]) -> (String, String) {
    let long = |i: usize| components.get(i).map_or(UNKNOWN, |c| c.long_name.as_str());
    let short = |i: usize| components.get(i).map_or(UNKNOWN, |c| c.short_name.as_str());

    let line1 = format!("{} {}", long(0), long(1));
    let line2 = format!("{}, {} {}", long(2), short(3), short(5));
    (line1, line2)
}

/// 価格帯を "$" の繰り返しで表す
pub fn price_glyphs(level: u8) -> String {
    "$".repeat(level as usize)
}

fn rating_text(rating: Option<f64>, total: Option<u32>) -> String {
    match rating {
        Some(rating) => {
            let total = total.map_or_else(|| UNKNOWN.to_string(), |t| t.to_string());
            format!("{} ({} total ratings)", rating, total)
        }
        None => UNKNOWN.to_string(),
    }
}

/// 文字数で切り詰め、切った場合は "..." を付ける
pub fn truncate_snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OpeningHours, Review};

    fn component(long: &str, short: &str) -> AddressComponent {
        AddressComponent {
            long_name: long.to_string(),
            short_name: short.to_string(),
        }
    }

    fn full_details() -> PlaceDetails {
        PlaceDetails {
            name: Some("Ritual Coffee".into()),
            photos: vec!["https://img/1".into(), "https://img/2".into()],
            address_components: Some(vec![
                component("1026", "1026"),
                component("Valencia Street", "Valencia St"),
                component("San Francisco", "SF"),
                component("California", "CA"),
                component("United States", "US"),
                component("94110", "94110"),
            ]),
            formatted_phone_number: Some("(415) 641-1011".into()),
            international_phone_number: Some("+1 415-641-1011".into()),
            website: Some("https://ritualroasters.com".into()),
            price_level: Some(2),
            rating: Some(4.4),
            user_ratings_total: Some(1200),
            opening_hours: Some(OpeningHours { open_now: Some(true) }),
            reviews: Some(vec![Review {
                author_name: "a".into(),
                text: "Great espresso.".into(),
            }]),
            url: Some("https://maps.google.com/?cid=1".into()),
        }
    }

    #[test]
    fn test_full_response() {
        let info = DetailInfo::from_details(&full_details(), &AppConfig::default());
        assert_eq!(info.photos.len(), 2);
        assert_eq!(info.address_line1, "1026 Valencia Street");
        assert_eq!(info.address_line2, "San Francisco, CA 94110");
        assert_eq!(info.phone, "(415) 641-1011");
        assert_eq!(info.homepage, "https://ritualroasters.com");
        assert_eq!(info.homepage_url(), Some("https://ritualroasters.com"));
        assert_eq!(info.price, "$$");
        assert_eq!(info.rating_text, "4.4 (1200 total ratings)");
        assert_eq!(info.open_status, OpenStatus::Open);
        assert_eq!(info.review_snippet, "Great espresso.");
        assert_eq!(info.review_url.as_deref(), Some("https://maps.google.com/?cid=1"));
    }

    #[test]
    fn test_empty_response_uses_sentinels() {
        let config = AppConfig::default();
        let info = DetailInfo::from_details(&PlaceDetails::default(), &config);
        assert_eq!(info.photos, vec![config.fallback_photo_url.clone()]);
        assert_eq!(info.address_line1, UNKNOWN);
        assert_eq!(info.address_line2, UNKNOWN);
        assert_eq!(info.phone, UNKNOWN);
        assert_eq!(info.homepage, UNKNOWN);
        assert_eq!(info.homepage_url(), None);
        assert_eq!(info.price, UNKNOWN);
        assert_eq!(info.rating_text, UNKNOWN);
        assert_eq!(info.open_status, OpenStatus::Unknown);
        assert_eq!(info.review_snippet, "No comments or link available.");
        assert!(info.review_url.is_none());
    }

    #[test]
    fn test_missing_rating_is_unknown_not_error() {
        let details = PlaceDetails {
            rating: None,
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.rating_text, UNKNOWN);
    }

    #[test]
    fn test_missing_total_keeps_rating() {
        let details = PlaceDetails {
            user_ratings_total: None,
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.rating_text, "4.4 (? total ratings)");
    }

    #[test]
    fn test_phone_falls_back_to_international() {
        let details = PlaceDetails {
            formatted_phone_number: None,
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.phone, "+1 415-641-1011");
    }

    #[test]
    fn test_short_address_components() {
        let details = PlaceDetails {
            address_components: Some(vec![component("1", "1"), component("Main St", "Main")]),
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.address_line1, "1 Main St");
        assert_eq!(info.address_line2, "?, ? ?");
    }

    #[test]
    fn test_closed_status() {
        let details = PlaceDetails {
            opening_hours: Some(OpeningHours { open_now: Some(false) }),
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.open_status.label(), "Now Closed");
    }

    #[test]
    fn test_price_levels() {
        assert_eq!(price_glyphs(0), "");
        assert_eq!(price_glyphs(4), "$$$$");
    }

    #[test]
    fn test_review_200_chars_truncated_to_150_plus_ellipsis() {
        let text = "a".repeat(200);
        let details = PlaceDetails {
            reviews: Some(vec![Review {
                author_name: String::new(),
                text,
            }]),
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.review_snippet, format!("{}...", "a".repeat(150)));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(151);
        let snippet = truncate_snippet(&text, 150);
        assert_eq!(snippet.chars().count(), 153);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_truncate_exactly_limit_untouched() {
        let text = "b".repeat(150);
        assert_eq!(truncate_snippet(&text, 150), text);
    }

    #[test]
    fn test_only_first_review_used() {
        let details = PlaceDetails {
            reviews: Some(vec![
                Review { author_name: String::new(), text: "first".into() },
                Review { author_name: String::new(), text: "second".into() },
            ]),
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.review_snippet, "first");
    }

    #[test]
    fn test_url_without_reviews() {
        let details = PlaceDetails {
            reviews: None,
            ..full_details()
        };
        let info = DetailInfo::from_details(&details, &AppConfig::default());
        assert_eq!(info.review_snippet, "View more details");
        assert!(info.review_url.is_some());
    }
}
