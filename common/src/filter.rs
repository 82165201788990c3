//! 名前による絞り込み

/// 小文字化し、空白をすべて取り除く
pub fn normalize_query(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// 正規化済みクエリが名前に部分一致するか
///
/// 空クエリはすべてに一致する。
pub fn matches_query(name: &str, normalized_query: &str) -> bool {
    normalized_query.is_empty() || normalize_query(name).contains(normalized_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_all_whitespace() {
        assert_eq!(normalize_query("  Coffee  "), "coffee");
        assert_eq!(normalize_query("Best\tCof fee\n"), "bestcoffee");
    }

    #[test]
    fn test_match_is_case_and_space_insensitive() {
        let q = normalize_query("  Coffee  ");
        assert!(matches_query("Best Coffee Shop", &q));
        assert!(!matches_query("Tea House", &q));
    }

    #[test]
    fn test_query_spanning_word_gap() {
        let q = normalize_query("bestcof");
        assert!(matches_query("Best Coffee Shop", &q));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches_query("Anything", ""));
        assert!(matches_query("", ""));
    }
}
