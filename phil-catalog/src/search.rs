//! Free-text filtering over the full catalogs.
//!
//! Discovery always searches everything, never the followed/joined
//! subsets. Both functions are pure and preserve catalog order.

use crate::types::{Church, SmallGroup};

/// Filter churches by case-insensitive substring match on name.
///
/// An empty query returns the full slice unchanged.
pub fn filter_churches<'a>(churches: &'a [Church], query: &str) -> Vec<&'a Church> {
    let needle = query.to_lowercase();
    churches
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Filter groups by case-insensitive substring match on name or any
/// focus tag.
pub fn filter_groups<'a>(groups: &'a [SmallGroup], query: &str) -> Vec<&'a SmallGroup> {
    let needle = query.to_lowercase();
    groups
        .iter()
        .filter(|g| {
            g.name.to_lowercase().contains(&needle)
                || g.focus.iter().any(|f| f.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_empty_query_returns_full_directory_in_order() {
        let catalog = Catalog::builtin();
        let results = filter_churches(catalog.directory(), "");

        assert_eq!(results.len(), catalog.directory().len());
        let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["v-decatur", "v-duluth", "v-stockbridge", "v-mcdonough", "v-college-park"]
        );
    }

    #[test]
    fn test_victory_matches_all_five_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(filter_churches(catalog.directory(), "victory").len(), 5);
        assert_eq!(filter_churches(catalog.directory(), "VICTORY").len(), 5);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let catalog = Catalog::builtin();
        assert!(filter_churches(catalog.directory(), "nonexistent-xyz").is_empty());
    }

    #[test]
    fn test_group_filter_matches_name() {
        let catalog = Catalog::builtin();
        let results = filter_groups(catalog.groups(), "bible");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "g-dec-2");
    }

    #[test]
    fn test_group_filter_matches_focus_tag() {
        let catalog = Catalog::builtin();
        let results = filter_groups(catalog.groups(), "scripture");
        let ids: Vec<&str> = results.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g-dec-2", "g-dul-2"]);
    }

    #[test]
    fn test_group_filter_empty_query_returns_all() {
        let catalog = Catalog::builtin();
        assert_eq!(filter_groups(catalog.groups(), "").len(), 6);
    }
}
