/// Cosine similarity of two equal-length vectors.
///
/// Feature vectors are nonnegative, so the result already lands in [0, 1].
/// Defined as zero when either vector has zero magnitude, and on a length
/// mismatch (which is logged: aligned layouts are a vectorizer invariant).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "feature vector length mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // Rounding can push a self-comparison a hair above 1.0.
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_nonzero_vectors_score_one() {
        let a = vec![0.8, 0.5, 0.0, 1.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = vec![0.3, 0.9, 0.1];
        let b = vec![0.7, 0.2, 0.5];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn never_exceeds_one_despite_rounding() {
        // Norms of irrational magnitudes make dot / (|a||b|) land just
        // above 1.0 without the clamp.
        let a = vec![0.1, 0.2, 0.3, 0.7, 0.9, 0.05, 0.55, 0.65];
        assert!(cosine_similarity(&a, &a) <= 1.0);
    }

    #[test]
    fn zero_magnitude_yields_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let other = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
    }

    #[test]
    fn length_mismatch_yields_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }
}
