//! Target-word subset enumeration.
//!
//! Smaller subsets let the ranker surface a clue that strongly links just
//! two or three words even when nothing links all K, so every non-empty
//! combination is scored. 2^K − 1 subsets for K targets; callers bound K
//! (practically ≤ 8–10) to keep the sweep tractable.

use itertools::Itertools;

/// Every combination of `words` of size 1..=K, ordered by increasing size,
/// within each size in the original relative order.
pub fn word_combinations(words: &[String]) -> Vec<Vec<&str>> {
    (1..=words.len())
        .flat_map(|k| words.iter().map(String::as_str).combinations(k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn three_words_yield_seven_subsets() {
        let words = owned(&["cat", "dog", "wolf"]);
        let combos = word_combinations(&words);

        assert_eq!(combos.len(), 7);
        assert_eq!(combos, vec![
            vec!["cat"],
            vec!["dog"],
            vec!["wolf"],
            vec!["cat", "dog"],
            vec!["cat", "wolf"],
            vec!["dog", "wolf"],
            vec!["cat", "dog", "wolf"],
        ]);
    }

    #[test]
    fn sizes_are_non_decreasing() {
        let words = owned(&["a", "b", "c", "d"]);
        let combos = word_combinations(&words);

        assert_eq!(combos.len(), 15);
        for pair in combos.windows(2) {
            assert!(pair[0].len() <= pair[1].len());
        }
    }

    #[test]
    fn empty_input_yields_no_subsets() {
        assert!(word_combinations(&[]).is_empty());
    }

    #[test]
    fn single_word_yields_itself() {
        assert_eq!(word_combinations(&owned(&["cat"])), vec![vec!["cat"]]);
    }
}
