//! Safety filtering and final ranking.
//!
//! The scorer's oversized cut is whittled down here: a guess survives only
//! if its clue is individually connected to every linked word, keeps a
//! safety margin from every avoid word, and is not a substring cheat. The
//! survivors get a composite score rewarding coverage and the top N are
//! returned in a stable order.

use tracing::debug;

use crate::core::embedding::EmbeddingTable;
use crate::core::guess::Guess;
use crate::core::metric::cosine;
use crate::core::solve::SolveError;

/// Filter `guesses` and return the `n` best by composite score.
///
/// Connectivity and avoid checks always use cosine, regardless of which
/// metric produced the raw scores: the threshold tiers are calibrated on
/// the cosine scale. Ties keep aggregation order (stable sort).
pub(crate) fn top_guesses(
    table: &EmbeddingTable,
    guesses: Vec<Guess>,
    avoid: &[String],
    threshold: f32,
    avoid_margin: f32,
    n: usize,
) -> Result<Vec<Guess>, SolveError> {
    let total = guesses.len();
    let mut dropped_connectivity = 0usize;
    let mut dropped_unsafe = 0usize;
    let mut dropped_illegal = 0usize;

    let mut survivors: Vec<Guess> = Vec::new();
    'guesses: for mut guess in guesses {
        let clue_vec = clue_vector(table, &guess.clue)?;

        // 1) The oversized cut upstream admits candidates that are only
        //    aggregate-similar; every linked word must clear the threshold
        //    individually.
        for word in &guess.linked_words {
            let word_vec = clue_vector(table, word)?;
            let sim = cosine(clue_vec, word_vec)
                .ok_or_else(|| SolveError::DegenerateVector(word.clone()))?;
            if sim < threshold {
                dropped_connectivity += 1;
                continue 'guesses;
            }
        }

        // 2) Avoid words only need a coarse margin, hence the multiplier.
        for word in avoid {
            let word_vec = clue_vector(table, word)?;
            let sim = cosine(clue_vec, word_vec)
                .ok_or_else(|| SolveError::DegenerateVector(word.clone()))?;
            if sim > threshold * avoid_margin {
                dropped_unsafe += 1;
                continue 'guesses;
            }
        }

        // 3) "cats" is not a clue for "cat".
        if guess
            .linked_words
            .iter()
            .any(|w| w.contains(guess.clue.as_str()) || guess.clue.contains(w.as_str()))
        {
            dropped_illegal += 1;
            continue 'guesses;
        }

        // 4) Linear coverage reward. A historical variant used
        //    cbrt(num_words_linked); linear is the documented default.
        guess.score = guess.similarity * guess.num_words_linked as f32;
        survivors.push(guess);
    }

    debug!(
        total,
        dropped_connectivity,
        dropped_unsafe,
        dropped_illegal,
        kept = survivors.len(),
        "guess filtering"
    );

    // 5) Stable sort keeps aggregation order on equal scores.
    survivors.sort_by(|a, b| b.score.total_cmp(&a.score));
    survivors.truncate(n);
    Ok(survivors)
}

fn clue_vector<'t>(table: &'t EmbeddingTable, word: &str) -> Result<&'t [f32], SolveError> {
    table
        .vector(word)
        .ok_or_else(|| SolveError::MissingEmbedding(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmbeddingTable {
        EmbeddingTable::from_pairs([
            ("cat", vec![1.0, 0.0]),
            ("cats", vec![0.99, 0.01]),
            ("dog", vec![0.9, 0.1]),
            ("fish", vec![0.0, 1.0]),
        ])
        .unwrap()
    }

    fn guess(clue: &str, similarity: f32, linked: &[&str]) -> Guess {
        Guess::new(
            clue.to_string(),
            similarity,
            linked.iter().map(|w| w.to_string()).collect(),
        )
    }

    #[test]
    fn connectivity_rejects_weak_links() {
        let t = table();
        // fish is orthogonal to cat; the guess must not survive
        let out = top_guesses(&t, vec![guess("fish", 0.5, &["cat"])], &[], 0.5, 2.0, 10).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn substring_clues_are_illegal_both_ways() {
        let t = table();
        let out = top_guesses(
            &t,
            vec![guess("cats", 0.99, &["cat"]), guess("cat", 0.99, &["cats"])],
            &[],
            0.5,
            2.0,
            10,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn avoid_words_near_the_clue_reject_it() {
        let t = table();
        // dog is close to cat; with avoid = ["cat"] and a tight margin the
        // guess dies, with no avoid list it survives
        let avoided = top_guesses(
            &t,
            vec![guess("dog", 0.9, &["cats"])],
            &["cat".to_string()],
            0.4,
            1.0,
            10,
        )
        .unwrap();
        assert!(avoided.is_empty());

        let kept =
            top_guesses(&t, vec![guess("dog", 0.9, &["cats"])], &[], 0.4, 1.0, 10).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn score_rewards_coverage_linearly() {
        let t = table();
        let out = top_guesses(
            &t,
            vec![
                guess("dog", 0.9, &["cat"]),
                guess("dog", 0.9, &["cat", "cats"]),
            ],
            &[],
            0.5,
            2.0,
            10,
        )
        .unwrap();

        assert_eq!(out.len(), 2);
        // two linked words double the composite score
        assert_eq!(out[0].num_words_linked, 2);
        assert!((out[0].score - 1.8).abs() < 1e-6);
        assert!((out[1].score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let t = table();
        let out = top_guesses(
            &t,
            vec![guess("dog", 0.9, &["cat"]), guess("cats", 0.9, &["dog"])],
            &[],
            0.5,
            2.0,
            10,
        )
        .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].clue, "dog");
        assert_eq!(out[1].clue, "cats");
    }
}
