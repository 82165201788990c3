//! 検索結果の並び替え

use crate::types::PlaceResult;

/// 名前のコードポイント順に並べる（安定ソート）
///
/// 同名の結果は入力順を保つ。件数は変わらない。
pub fn sort_by_name(mut results: Vec<PlaceResult>) -> Vec<PlaceResult> {
    results.sort_by(|a, b| a.name.cmp(&b.name));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, name: &str) -> PlaceResult {
        PlaceResult {
            place_id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn names(results: &[PlaceResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_sorts_alphabetically() {
        let sorted = sort_by_name(vec![
            place("1", "Sightglass"),
            place("2", "Blue Bottle"),
            place("3", "Ritual"),
        ]);
        assert_eq!(names(&sorted), vec!["Blue Bottle", "Ritual", "Sightglass"]);
    }

    #[test]
    fn test_code_point_order_puts_uppercase_first() {
        let sorted = sort_by_name(vec![place("1", "cafe"), place("2", "Zeitgeist")]);
        assert_eq!(names(&sorted), vec!["Zeitgeist", "cafe"]);
    }

    #[test]
    fn test_duplicate_names_keep_input_order() {
        let sorted = sort_by_name(vec![
            place("b", "Starbucks"),
            place("x", "Andytown"),
            place("a", "Starbucks"),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|r| r.place_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "b", "a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_by_name(Vec::new()).is_empty());
    }
}
