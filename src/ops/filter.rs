use unicode_segmentation::UnicodeSegmentation;

use crate::model::{Category, Item};

/// Default number of item suggestions
pub const SUGGESTION_LIMIT: usize = 5;

/// Categories whose name starts with `query` (case-insensitive), in their
/// original order.
pub fn filter_categories(query: &str, categories: &[Category]) -> Vec<Category> {
    let query = query.to_lowercase();
    categories
        .iter()
        .filter(|c| c.name_starts_with(&query))
        .cloned()
        .collect()
}

/// Item suggestions for the plain-text input.
///
/// An empty query yields the `limit` most recent items unfiltered. Otherwise
/// items are prefix-matched (case-insensitive) and ranked shortest name
/// first, so an exact match beats a longer partial one. The sort is stable:
/// equal lengths keep recency order.
pub fn filter_suggestions(query: &str, items: &[Item], limit: usize) -> Vec<Item> {
    if query.is_empty() {
        return items.iter().take(limit).cloned().collect();
    }

    let query = query.to_lowercase();
    let mut matches: Vec<&Item> = items
        .iter()
        .filter(|item| item.name_starts_with(&query))
        .collect();
    matches.sort_by_key(|item| item.name.graphemes(true).count());
    matches.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;
    use pretty_assertions::assert_eq;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .map(|n| Item::new(*n, CategoryId::new("work")))
            .collect()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn categories_prefix_case_insensitive() {
        let cats = vec![
            Category::new("work", "Work", "#FFFFFF"),
            Category::new("personal", "Personal", "#FFFFFF"),
            Category::new("workout", "Workout", "#FFFFFF"),
        ];
        let got = filter_categories("wO", &cats);
        let got: Vec<&str> = got.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(got, vec!["Work", "Workout"]);
    }

    #[test]
    fn empty_category_query_returns_all() {
        let cats = vec![
            Category::new("work", "Work", "#FFFFFF"),
            Category::new("personal", "Personal", "#FFFFFF"),
        ];
        assert_eq!(filter_categories("", &cats), cats);
    }

    #[test]
    fn no_category_match_is_empty() {
        let cats = vec![Category::new("work", "Work", "#FFFFFF")];
        assert!(filter_categories("zzz", &cats).is_empty());
        assert!(filter_categories("w", &[]).is_empty());
    }

    #[test]
    fn empty_query_takes_most_recent_unfiltered() {
        let all = items(&["A", "B", "C", "D", "E", "F"]);
        let got = filter_suggestions("", &all, SUGGESTION_LIMIT);
        assert_eq!(names(&got), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn shortest_match_ranks_first() {
        let all = items(&["Write quarterly report", "Write memo", "Walk dog", "Write"]);
        let got = filter_suggestions("wri", &all, SUGGESTION_LIMIT);
        assert_eq!(names(&got), vec!["Write", "Write memo", "Write quarterly report"]);
    }

    #[test]
    fn equal_lengths_keep_recency_order() {
        let all = items(&["Call Bob", "Call Ann", "Call Eve"]);
        let got = filter_suggestions("call", &all, SUGGESTION_LIMIT);
        assert_eq!(names(&got), vec!["Call Bob", "Call Ann", "Call Eve"]);
    }

    #[test]
    fn limit_applies_after_ranking() {
        let all = items(&["aaaaaa", "aaaaa", "aaaa", "aaa", "aa", "a"]);
        let got = filter_suggestions("a", &all, 2);
        assert_eq!(names(&got), vec!["a", "aa"]);
    }

    #[test]
    fn filtering_does_not_touch_source() {
        let all = items(&["b long", "b"]);
        let before = all.clone();
        let _ = filter_suggestions("b", &all, SUGGESTION_LIMIT);
        assert_eq!(all, before);
    }
}
