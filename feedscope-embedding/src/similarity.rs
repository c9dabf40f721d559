//! Cosine similarity calculations

use ndarray::Array1;

use feedscope_core::ContractViolation;

/// Calculate cosine similarity between two embeddings
///
/// Returns a value between -1.0 (opposite) and 1.0 (identical direction).
///
/// Formula: cos(θ) = (A · B) / (||A|| ||B||)
/// where:
/// - A · B is the dot product
/// - ||A|| and ||B|| are the magnitudes (L2 norms)
///
/// Arithmetic is done in `f64`. There is no zero-vector guard: if either
/// norm is zero the result is NaN.
///
/// # Panics
/// If `a` and `b` differ in length. Use [`try_cosine_similarity`] to get an
/// error instead.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "Embeddings must have same dimension (got {} and {})",
        a.len(),
        b.len()
    );

    let a: Array1<f64> = a.iter().map(|&v| f64::from(v)).collect();
    let b: Array1<f64> = b.iter().map(|&v| f64::from(v)).collect();

    let dot_product = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    dot_product / (norm_a * norm_b)
}

/// Length-checked cosine similarity
pub fn try_cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ContractViolation> {
    if a.len() != b.len() {
        return Err(ContractViolation::dimension_mismatch(
            "cosine similarity",
            a.len(),
            b.len(),
        ));
    }
    Ok(cosine_similarity(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-9, "Identical vectors should have similarity ~1.0");
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert_eq!(sim, 0.0, "Orthogonal vectors should have similarity 0.0");
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-1.0, -2.0, -3.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-9, "Opposite vectors should have similarity ~-1.0");
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.3, -1.2, 4.5, 0.01];
        let b = vec![2.2, 0.7, -0.4, 3.3];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_scale_invariant() {
        // [4, 3] vs [5, 0] is exactly 0.8
        assert_eq!(cosine_similarity(&[4.0, 3.0], &[5.0, 0.0]), 0.8);
        assert_eq!(cosine_similarity(&[8.0, 6.0], &[1.0, 0.0]), 0.8);
    }

    #[test]
    fn test_zero_vector_is_nan() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
    }

    #[test]
    #[should_panic(expected = "Embeddings must have same dimension")]
    fn test_mismatched_lengths_panic() {
        cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_try_mismatched_lengths() {
        let err = try_cosine_similarity(&[1.0], &[1.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::DimensionMismatch {
                context: "cosine similarity".to_string(),
                expected: 1,
                actual: 2,
            }
        );
    }
}
