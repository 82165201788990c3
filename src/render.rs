//! 端末向けの表示整形

use cafe_finder_common::{AppState, DetailInfo, PlaceRecord};

/// 一覧の1行
pub fn record_line(record: &PlaceRecord) -> String {
    let star = if record.is_top_rated { "★" } else { " " };
    let memo = if record.has_annotation() { " ✎" } else { "" };
    let rating = record
        .rating
        .map_or_else(|| "-".to_string(), |r| format!("{:.1}", r));
    format!("{} {:<32} {:>4}  {}{}", star, record.name, rating, record.vicinity, memo)
}

/// 表示中の一覧
pub fn visible_list(state: &AppState) -> String {
    let visible = state.visible_records();
    if state.no_match() {
        return "一致する店舗はありません".to_string();
    }

    let mut lines = vec![format!(
        "{} 周辺: {}件中{}件を表示{}",
        state.locality(),
        state.records().len(),
        visible.len(),
        if state.top_rated_only() { "（高評価のみ）" } else { "" },
    )];
    lines.extend(visible.iter().map(|r| record_line(r)));
    lines.join("\n")
}

pub fn detail_block(name: &str, detail: &DetailInfo) -> String {
    let mut lines = vec![
        name.to_string(),
        format!("  住所: {}", detail.address_line1),
        format!("        {}", detail.address_line2),
        format!("  電話: {}", detail.phone),
        format!("  HP:   {}", detail.homepage),
        format!("  価格: {}", detail.price),
        format!("  評価: {}", detail.rating_text),
        format!("  状態: {}", detail.open_status.label()),
        format!("  口コミ: {}", detail.review_snippet),
    ];
    if let Some(url) = &detail.review_url {
        lines.push(format!("  出典: {}", url));
    }
    lines.push(format!("  写真: {}枚", detail.photos.len()));
    lines.join("\n")
}
