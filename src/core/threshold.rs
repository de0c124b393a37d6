//! Threshold strategy tiers and resolution.
//!
//! A clue only "counts" as connected to a target word if their similarity
//! clears a minimum. That minimum comes from a named risk tier resolved
//! against an optional calibration table; missing table or missing row falls
//! back to a fixed default and is logged, never fatal.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::metric::Metric;
use crate::core::scorer::ScoringPolicy;

/// Fallback when no calibration row matches.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Risk profile for how tightly a clue must connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    Risky,
    QuiteRisky,
    #[default]
    Moderate,
    QuiteConservative,
    Conservative,
}

impl Strategy {
    /// Stable name used in config lookups and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Risky => "risky",
            Strategy::QuiteRisky => "quite-risky",
            Strategy::Moderate => "moderate",
            Strategy::QuiteConservative => "quite-conservative",
            Strategy::Conservative => "conservative",
        }
    }
}

/// One calibration row, keyed by embedding source, metric, scoring policy,
/// and strategy tier. Lives in `clueword.toml` as a `[[thresholds]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRow {
    /// Embedding source name, e.g. "glove", "postspec", "wordnet"
    pub source: String,

    /// Metric name as in [`Metric::name`]
    pub metric: String,

    /// Scoring policy name as in [`ScoringPolicy::name`]
    pub algorithm: String,

    /// Strategy tier name as in [`Strategy::name`]
    pub strategy: String,

    /// Minimum per-word similarity
    pub value: f32,
}

/// Resolve the threshold for a solve invocation.
///
/// Returns the first row matching all four keys; otherwise
/// [`DEFAULT_THRESHOLD`]. Resolution never fails — a missing table and a
/// missing row are both fallback triggers.
pub fn resolve_threshold(
    rows: Option<&[ThresholdRow]>,
    source: &str,
    metric: Metric,
    policy: ScoringPolicy,
    strategy: Strategy,
) -> f32 {
    if let Some(rows) = rows {
        let hit = rows.iter().find(|r| {
            r.source == source
                && r.metric == metric.name()
                && r.algorithm == policy.name()
                && r.strategy == strategy.name()
        });
        if let Some(row) = hit {
            info!(
                strategy = strategy.name(),
                threshold = row.value,
                "using calibrated threshold"
            );
            return row.value;
        }
    }

    info!(
        strategy = strategy.name(),
        threshold = DEFAULT_THRESHOLD,
        "no calibration row; using default threshold"
    );
    DEFAULT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(strategy: &str, value: f32) -> ThresholdRow {
        ThresholdRow {
            source: "glove".into(),
            metric: "cosine".into(),
            algorithm: "mean-individual".into(),
            strategy: strategy.into(),
            value,
        }
    }

    #[test]
    fn missing_table_falls_back() {
        let t = resolve_threshold(
            None,
            "glove",
            Metric::Cosine,
            ScoringPolicy::MeanIndividualDistance,
            Strategy::Conservative,
        );
        assert_eq!(t, DEFAULT_THRESHOLD);
    }

    #[test]
    fn matching_row_wins() {
        let rows = vec![row("moderate", 0.35), row("conservative", 0.55)];
        let t = resolve_threshold(
            Some(&rows),
            "glove",
            Metric::Cosine,
            ScoringPolicy::MeanIndividualDistance,
            Strategy::Conservative,
        );
        assert_eq!(t, 0.55);
    }

    #[test]
    fn partial_key_match_still_falls_back() {
        let rows = vec![row("conservative", 0.55)];
        // same strategy, different metric
        let t = resolve_threshold(
            Some(&rows),
            "glove",
            Metric::Dot,
            ScoringPolicy::MeanIndividualDistance,
            Strategy::Conservative,
        );
        assert_eq!(t, DEFAULT_THRESHOLD);
    }
}
