// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cosine similarity over sparse term-frequency vectors.

use crate::types::SparseVector;

/// Cosine similarity of two term-frequency vectors.
///
/// Returns exactly 0.0 when either vector has zero norm. Counts are
/// non-negative, so the result lies in `[0, 1]`; it is clamped at 1.0 to
/// absorb floating-point overshoot on identical vectors.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::embed;
    use proptest::prelude::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = embed("tell me about rust programming rust");
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_scores_zero() {
        let v = embed("rust");
        let zero = SparseVector::new();
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn disjoint_vectors_score_zero() {
        assert_eq!(cosine_similarity(&embed("pizza"), &embed("rust")), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // {a:1,b:1} vs {a:1}: 1 / (sqrt(2) * 1)
        let sim = cosine_similarity(&embed("a b"), &embed("a"));
        assert!((sim - 1.0 / 2f64.sqrt()).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn symmetric_and_bounded(a in "[a-e ]{0,40}", b in "[a-e ]{0,40}") {
            let (va, vb) = (embed(&a), embed(&b));
            let ab = cosine_similarity(&va, &vb);
            let ba = cosine_similarity(&vb, &va);
            prop_assert!((ab - ba).abs() < 1e-12);
            prop_assert!((0.0..=1.0).contains(&ab));
        }

        #[test]
        fn self_similarity_is_one(text in "[a-z]{1,8}( [a-z]{1,8}){0,10}") {
            let v = embed(&text);
            prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
        }
    }
}
