//! Candidate clue record.

use serde::{Deserialize, Serialize};

/// One candidate clue tied to the subset of target words it was scored
/// against.
///
/// Created once per (candidate word, subset) pair and immutable afterwards,
/// except for `score`, which stays 0.0 until the ranker assigns the final
/// composite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// The proposed clue word
    pub clue: String,

    /// Raw similarity from the scoring metric (higher = more similar)
    pub similarity: f32,

    /// Target-word subset this guess was derived from, in target order
    pub linked_words: Vec<String>,

    /// Derived: `linked_words.len()`
    pub num_words_linked: usize,

    /// Final composite score, populated by the ranker
    pub score: f32,
}

impl Guess {
    pub fn new(clue: String, similarity: f32, linked_words: Vec<String>) -> Self {
        let num_words_linked = linked_words.len();
        Self {
            clue,
            similarity,
            linked_words,
            num_words_linked,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_words_linked_is_derived() {
        let g = Guess::new("pet".into(), 0.8, vec!["cat".into(), "dog".into()]);
        assert_eq!(g.num_words_linked, 2);
        assert_eq!(g.score, 0.0);
    }
}
