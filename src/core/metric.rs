//! Similarity metrics over embedding vectors.
//!
//! Closed set of metrics rather than caller-supplied callables, so the rest
//! of the engine can match on the variant and config files can name it.
//! Higher is always "more similar" for every variant.

/// Supported vector similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Normalized dot product in [-1, 1]. The threshold tiers are
    /// calibrated on this scale.
    #[default]
    Cosine,

    /// Plain dot product, no normalization. Cheaper, scale-sensitive:
    /// favors high-magnitude vectors.
    Dot,
}

impl Metric {
    /// Stable name used in config lookups and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Cosine => "cosine",
            Metric::Dot => "dot",
        }
    }

    /// Similarity of two equal-length vectors.
    ///
    /// Returns `None` when the metric is undefined for the inputs (cosine
    /// with a zero-magnitude vector). Callers turn that into a typed error
    /// naming the word instead of letting NaN leak into the ranking.
    pub fn pair_score(self, a: &[f32], b: &[f32]) -> Option<f32> {
        match self {
            Metric::Dot => Some(dot(a, b)),
            Metric::Cosine => {
                let na = l2_norm(a);
                let nb = l2_norm(b);
                if na == 0.0 || nb == 0.0 {
                    None
                } else {
                    Some(dot(a, b) / (na * nb))
                }
            }
        }
    }
}

/// Dot product of two equal-length slices.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
pub fn l2_norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

/// Cosine similarity, `None` when either vector has zero magnitude.
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
    Metric::Cosine.pair_score(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.3, -0.7, 1.2];
        let sim = cosine(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let sim = cosine(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_is_scale_invariant_dot_is_not() {
        let a = [1.0, 2.0];
        let b = [10.0, 20.0];

        let c1 = cosine(&a, &a).unwrap();
        let c2 = cosine(&a, &b).unwrap();
        assert!((c1 - c2).abs() < 1e-6);

        assert!(Metric::Dot.pair_score(&a, &b).unwrap() > Metric::Dot.pair_score(&a, &a).unwrap());
    }

    #[test]
    fn cosine_with_zero_vector_is_undefined() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), None);
        // dot product stays defined
        assert_eq!(Metric::Dot.pair_score(&[0.0, 0.0], &[1.0, 0.0]), Some(0.0));
    }
}
