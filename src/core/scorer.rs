//! Per-subset candidate scoring.
//!
//! For one subset of target words, produce a ranked list of
//! (candidate word, raw score) pairs drawn from the whole embedding table.
//! The cut is deliberately oversized (`n * search_space_multiplier`) so the
//! safety filter downstream can discard illegal and unsafe clues without
//! starving the final top-N.

use smallvec::SmallVec;

use crate::core::embedding::EmbeddingTable;
use crate::core::metric::{Metric, dot, l2_norm};
use crate::core::solve::SolveError;

/// How a subset's words are turned into per-candidate scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringPolicy {
    /// Score every candidate against each subset word individually, then
    /// average. Keeps per-word resolution at |S| similarity passes.
    #[default]
    MeanIndividualDistance,

    /// Aggregate the subset into one mean vector and score each candidate
    /// once against it. Cheaper; a candidate strongly tied to one word and
    /// weakly to another can score the same as one moderately tied to both.
    SummedNearestNeighbour,
}

impl ScoringPolicy {
    /// Stable name used in config lookups and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            ScoringPolicy::MeanIndividualDistance => "mean-individual",
            ScoringPolicy::SummedNearestNeighbour => "summed-neighbour",
        }
    }
}

/// Score every candidate in `table` (minus the subset itself) against
/// `subset`, returning the top `take` pairs by raw score.
///
/// Ties keep table insertion order (stable sort), so output is fully
/// deterministic for a given table. Pairs are neither filtered nor globally
/// ranked here.
pub(crate) fn score_subset(
    table: &EmbeddingTable,
    subset: &[&str],
    metric: Metric,
    policy: ScoringPolicy,
    take: usize,
) -> Result<Vec<(String, f32)>, SolveError> {
    // Declared before `targets` so it outlives the shadowing binding below
    // that may borrow it (drop order is reverse of declaration).
    let aggregate: Vec<f32>;

    let targets: SmallVec<[&[f32]; 8]> = subset
        .iter()
        .map(|w| {
            table
                .vector(w)
                .ok_or_else(|| SolveError::MissingEmbedding(w.to_string()))
        })
        .collect::<Result<_, _>>()?;

    // Cosine is undefined for a zero-magnitude vector; reject before it can
    // poison every candidate's mean.
    let target_norms: SmallVec<[f32; 8]> = match metric {
        Metric::Cosine => {
            let norms: SmallVec<[f32; 8]> = targets.iter().map(|v| l2_norm(v)).collect();
            if let Some(i) = norms.iter().position(|&n| n == 0.0) {
                return Err(SolveError::DegenerateVector(subset[i].to_string()));
            }
            norms
        }
        Metric::Dot => SmallVec::new(),
    };

    // SummedNearestNeighbour collapses the subset up front.
    let (targets, target_norms): (SmallVec<[&[f32]; 8]>, SmallVec<[f32; 8]>) = match policy {
        ScoringPolicy::MeanIndividualDistance => (targets, target_norms),
        ScoringPolicy::SummedNearestNeighbour => {
            aggregate = mean_vector(&targets, table.dim());
            let norm = l2_norm(&aggregate);
            if metric == Metric::Cosine && norm == 0.0 {
                return Err(SolveError::DegenerateAggregate(
                    subset.iter().map(|w| w.to_string()).collect(),
                ));
            }
            (SmallVec::from_slice(&[aggregate.as_slice()]), SmallVec::from_slice(&[norm]))
        }
    };

    let mut scored: Vec<(&str, f32)> = Vec::with_capacity(table.len().saturating_sub(subset.len()));
    for (word, row) in table.iter() {
        if subset.contains(&word) {
            continue;
        }
        let score = mean_score(metric, &targets, &target_norms, row)
            .ok_or_else(|| SolveError::DegenerateVector(word.to_string()))?;
        scored.push((word, score));
    }

    // Stable sort: equal scores keep table insertion order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(take);

    Ok(scored
        .into_iter()
        .map(|(word, score)| (word.to_string(), score))
        .collect())
}

/// Mean of the metric's similarity between `cand` and each target vector.
/// `None` when cosine is undefined for `cand`.
fn mean_score(
    metric: Metric,
    targets: &[&[f32]],
    target_norms: &[f32],
    cand: &[f32],
) -> Option<f32> {
    let sum = match metric {
        Metric::Dot => targets.iter().map(|t| dot(t, cand)).sum::<f32>(),
        Metric::Cosine => {
            let cand_norm = l2_norm(cand);
            if cand_norm == 0.0 {
                return None;
            }
            targets
                .iter()
                .zip(target_norms)
                .map(|(t, tn)| dot(t, cand) / (tn * cand_norm))
                .sum::<f32>()
        }
    };
    Some(sum / targets.len() as f32)
}

/// Elementwise mean of the target vectors.
fn mean_vector(targets: &[&[f32]], dim: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; dim];
    for t in targets {
        for (o, x) in out.iter_mut().zip(*t) {
            *o += x;
        }
    }
    let k = targets.len() as f32;
    for o in &mut out {
        *o /= k;
    }
    out
}
