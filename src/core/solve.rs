//! The solve pipeline: enumerate, score, aggregate, rank.
//!
//! One immutable request in, one ranked guess list out. All state is local
//! to the call; the embedding table is borrowed read-only, so any number of
//! solves may run concurrently over the same table without locking.

use itertools::Itertools;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::core::combinations::word_combinations;
use crate::core::embedding::EmbeddingTable;
use crate::core::guess::Guess;
use crate::core::metric::Metric;
use crate::core::ranker::top_guesses;
use crate::core::scorer::{ScoringPolicy, score_subset};
use crate::core::threshold::DEFAULT_THRESHOLD;

/// Errors surfaced by the engine.
///
/// Missing embeddings are surfaced rather than patched over: a silently
/// substituted placeholder vector corrupts every mean and sum the word
/// participates in, which is worse than failing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolveError {
    /// A target, avoid, or candidate word has no vector in the table.
    #[error("no embedding found for word '{0}'")]
    MissingEmbedding(String),

    /// A word's vector has zero magnitude, so cosine similarity is
    /// undefined for it.
    #[error("embedding for '{0}' has zero magnitude; cosine similarity is undefined")]
    DegenerateVector(String),

    /// The aggregated subset vector has zero magnitude.
    #[error("aggregated vector for {0:?} has zero magnitude; cosine similarity is undefined")]
    DegenerateAggregate(Vec<String>),
}

/// One solve invocation, passed by reference into [`solve`].
///
/// Construct with [`SolveRequest::new`] and override fields as needed:
///
/// ```
/// use clueword::core::solve::{SolveRequest, solve};
/// use clueword::core::embedding::EmbeddingTable;
///
/// let table = EmbeddingTable::from_pairs([
///     ("cat", vec![1.0, 0.0]),
///     ("dog", vec![0.9, 0.1]),
///     ("fish", vec![0.0, 1.0]),
/// ]).unwrap();
/// let targets = vec!["cat".to_string()];
///
/// let req = SolveRequest { n: 1, ..SolveRequest::new(&table, &targets, &[]) };
/// let guesses = solve(&req).unwrap();
/// assert_eq!(guesses[0].clue, "dog");
/// ```
#[derive(Debug, Clone)]
pub struct SolveRequest<'a> {
    /// Pre-built embedding table, shared read-only
    pub table: &'a EmbeddingTable,

    /// Words the clue should connect, in caller order
    pub targets: &'a [String],

    /// Words the clue must stay away from
    pub avoid: &'a [String],

    /// Maximum number of guesses to return
    pub n: usize,

    /// Similarity metric for candidate scoring
    pub metric: Metric,

    /// Per-subset scoring policy
    pub policy: ScoringPolicy,

    /// Minimum per-word cosine similarity for a clue to count as connected
    pub threshold: f32,

    /// Over-selection factor applied before filtering
    pub search_space_multiplier: usize,

    /// Avoid words are rejected above `threshold * avoid_margin`
    pub avoid_margin: f32,
}

impl<'a> SolveRequest<'a> {
    /// A request with the documented defaults: top 10, cosine,
    /// mean-individual scoring, default threshold, 10× search space,
    /// 2× avoid margin.
    pub fn new(table: &'a EmbeddingTable, targets: &'a [String], avoid: &'a [String]) -> Self {
        Self {
            table,
            targets,
            avoid,
            n: 10,
            metric: Metric::Cosine,
            policy: ScoringPolicy::MeanIndividualDistance,
            threshold: DEFAULT_THRESHOLD,
            search_space_multiplier: 10,
            avoid_margin: 2.0,
        }
    }
}

/// Rank clue candidates for the request's target words.
///
/// Returns at most `n` guesses, best first. An empty target list and a
/// fully-filtered candidate set both yield `Ok(empty)` — "no good clue
/// found" is an answer, not an error; the caller decides how to present it.
///
/// Deterministic: identical inputs produce identical output. Subsets are
/// scored in parallel but collected in enumeration order, and every sort in
/// the pipeline is stable.
pub fn solve(req: &SolveRequest<'_>) -> Result<Vec<Guess>, SolveError> {
    if req.targets.is_empty() {
        return Ok(Vec::new());
    }

    // Lowercase to match the table's normalization; dedup defensively so a
    // repeated target cannot double-count its subsets.
    let targets: Vec<String> = req
        .targets
        .iter()
        .map(|w| w.to_lowercase())
        .unique()
        .collect();
    let avoid: Vec<String> = req.avoid.iter().map(|w| w.to_lowercase()).unique().collect();

    // Fail on out-of-vocabulary inputs before any scoring work.
    for word in targets.iter().chain(avoid.iter()) {
        if !req.table.contains(word) {
            return Err(SolveError::MissingEmbedding(word.clone()));
        }
    }

    let combos = word_combinations(&targets);
    let take = req.n.saturating_mul(req.search_space_multiplier);
    debug!(
        targets = targets.len(),
        subsets = combos.len(),
        take,
        metric = req.metric.name(),
        policy = req.policy.name(),
        "scoring subsets"
    );

    // Embarrassingly parallel across subsets; collect preserves enumeration
    // order, so the aggregate list matches the sequential run.
    let per_subset: Vec<Vec<(String, f32)>> = combos
        .par_iter()
        .map(|subset| score_subset(req.table, subset, req.metric, req.policy, take))
        .collect::<Result<_, _>>()?;

    // Flat aggregation, no dedup: the same clue may recur with different
    // linked subsets, and the ranker chooses among them.
    let mut guesses: Vec<Guess> = Vec::new();
    for (subset, scored) in combos.iter().zip(per_subset) {
        for (clue, similarity) in scored {
            let linked = subset.iter().map(|w| w.to_string()).collect();
            guesses.push(Guess::new(clue, similarity, linked));
        }
    }

    top_guesses(
        req.table,
        guesses,
        &avoid,
        req.threshold,
        req.avoid_margin,
        req.n,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmbeddingTable {
        EmbeddingTable::from_pairs([
            ("cat", vec![1.0, 0.0]),
            ("dog", vec![0.9, 0.1]),
            ("fish", vec![0.0, 1.0]),
            ("car", vec![0.1, 0.9]),
        ])
        .unwrap()
    }

    #[test]
    fn empty_targets_yield_empty_result() {
        let t = table();
        let avoid = vec!["cat".to_string()];
        let req = SolveRequest::new(&t, &[], &avoid);
        assert_eq!(solve(&req).unwrap(), Vec::new());
    }

    #[test]
    fn missing_target_is_surfaced() {
        let t = table();
        let targets = vec!["unicorn".to_string()];
        let req = SolveRequest::new(&t, &targets, &[]);
        assert_eq!(
            solve(&req).unwrap_err(),
            SolveError::MissingEmbedding("unicorn".into())
        );
    }

    #[test]
    fn missing_avoid_word_is_surfaced() {
        let t = table();
        let targets = vec!["cat".to_string()];
        let avoid = vec!["unicorn".to_string()];
        let req = SolveRequest::new(&t, &targets, &avoid);
        assert_eq!(
            solve(&req).unwrap_err(),
            SolveError::MissingEmbedding("unicorn".into())
        );
    }

    #[test]
    fn targets_are_case_normalized_and_deduped() {
        let t = table();
        let targets = vec!["Cat".to_string(), "CAT".to_string()];
        let req = SolveRequest { threshold: 0.5, ..SolveRequest::new(&t, &targets, &[]) };

        let guesses = solve(&req).unwrap();
        assert!(!guesses.is_empty());
        // one deduped target → every guess links exactly ["cat"]
        for g in &guesses {
            assert_eq!(g.linked_words, vec!["cat".to_string()]);
        }
    }
}
