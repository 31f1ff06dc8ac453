//! Suggestion ordering
//!
//! Merged provider results are sorted by fuzzy similarity between the query
//! and the suggestion name, best match first, then truncated to the
//! configured maximum. The sort is stable, so equally scored suggestions keep
//! provider order (geocoding results ahead of directory results).

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::suggestion::Suggestion;

/// Rank suggestions against the query and cap the list at `max_results`.
pub fn rank(query: &str, mut suggestions: Vec<Suggestion>, max_results: usize) -> Vec<Suggestion> {
    if suggestions.is_empty() {
        return suggestions;
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    suggestions.sort_by_key(|s| {
        // Unmatched names score 0 and sink to the end
        std::cmp::Reverse(matcher.fuzzy_match(&s.name, query).unwrap_or(0))
    });
    suggestions.truncate(max_results);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::suggestion::PlaceKind;

    fn place(name: &str) -> Suggestion {
        Suggestion::new(name, 0.0, 0.0, PlaceKind::Municipality)
    }

    #[test]
    fn test_empty_input() {
        assert!(rank("Lyon", vec![], 15).is_empty());
    }

    #[test]
    fn test_exact_name_ranks_first() {
        let ranked = rank(
            "Lyon",
            vec![place("Lyons-la-Forêt"), place("Lyon"), place("Oullins-Lyon")],
            15,
        );
        assert_eq!(ranked[0].name, "Lyon");
    }

    #[test]
    fn test_unrelated_names_sink() {
        let ranked = rank("Paris", vec![place("Marseille"), place("Paris")], 15);
        assert_eq!(ranked[0].name, "Paris");
        assert_eq!(ranked[1].name, "Marseille");
    }

    #[test]
    fn test_truncates_to_max_results() {
        let suggestions = (0..20).map(|i| place(&format!("Place {i}"))).collect();
        let ranked = rank("Place", suggestions, 15);
        assert_eq!(ranked.len(), 15);
    }

    #[test]
    fn test_stable_for_equal_scores() {
        // Identical names score identically; provider order must survive
        let first = place("Saint-Pierre").with_id("first");
        let second = place("Saint-Pierre").with_id("second");
        let ranked = rank("Saint-Pierre", vec![first, second], 15);
        assert_eq!(ranked[0].id.as_deref(), Some("first"));
        assert_eq!(ranked[1].id.as_deref(), Some("second"));
    }

    #[test]
    fn test_case_insensitive_match() {
        let ranked = rank("lyon", vec![place("Nantes"), place("Lyon")], 15);
        assert_eq!(ranked[0].name, "Lyon");
    }
}
