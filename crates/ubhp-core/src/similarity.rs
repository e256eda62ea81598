//! Auxiliary ray arithmetic: unit normalization and cosine similarity.

use crate::error::{HarmonyError, HarmonyResult};

/// Normalize a byte sequence to a unit-length f64 ray.
///
/// Divides every byte value by the sequence's Euclidean norm. A zero-norm
/// input (empty, or all zero bytes) is returned unscaled rather than
/// producing NaNs.
pub fn unit_ray(bytes: &[u8]) -> Vec<f64> {
    let values: Vec<f64> = bytes.iter().map(|&b| f64::from(b)).collect();
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm == 0.0 {
        return values;
    }
    values.iter().map(|v| v / norm).collect()
}

/// Cosine similarity over the shared prefix of two vectors.
///
/// Operands of unequal length are compared over the shorter length; a zero
/// magnitude on either side yields `0.0` (defined policy, not an error).
///
/// # Errors
/// [`HarmonyError::EmptyInput`] if either operand is empty.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> HarmonyResult<f64> {
    if a.is_empty() || b.is_empty() {
        return Err(HarmonyError::EmptyInput);
    }

    let len = a.len().min(b.len());
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for i in 0..len {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let magnitude = norm_a.sqrt() * norm_b.sqrt();
    if magnitude == 0.0 {
        return Ok(0.0);
    }
    Ok(dot / magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ray_has_unit_norm() {
        let ray = unit_ray(b"some input bytes");
        let norm: f64 = ray.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unit_ray_zero_norm_passthrough() {
        assert_eq!(unit_ray(&[]), Vec::<f64>::new());
        assert_eq!(unit_ray(&[0, 0, 0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn unit_ray_of_3_4_is_06_08() {
        let ray = unit_ray(&[3, 4]);
        assert!((ray[0] - 0.6).abs() < 1e-12);
        assert!((ray[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn cosine_similarity_of_parallel_vectors_is_one() {
        let a = [1.0, 2.0, 3.0];
        let b = [2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_similarity_of_orthogonal_vectors_is_zero() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn cosine_similarity_uses_shared_prefix() {
        let a = [1.0, 0.0, 99.0];
        let b = [1.0, 0.0];
        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_similarity_zero_magnitude_is_zero() {
        let a = [0.0, 0.0];
        let b = [1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn cosine_similarity_empty_operand_is_an_error() {
        assert!(matches!(
            cosine_similarity(&[], &[1.0]),
            Err(HarmonyError::EmptyInput)
        ));
    }
}
