//! Centroid aggregation: componentwise arithmetic mean of equal-dimension
//! vectors.
//!
//! Preconditions are enforced, never papered over: an empty input set and a
//! dimension mismatch are both typed errors, with no silent truncation or
//! padding.

use crate::error::{HarmonyError, HarmonyResult};
use crate::ray::Ray;

/// Componentwise mean of a set of equal-dimension vectors.
///
/// # Errors
/// - [`HarmonyError::EmptyInput`] for zero vectors
/// - [`HarmonyError::DimensionMismatch`] when any vector's dimension differs
///   from the first's
///
/// # Example
/// ```
/// use ubhp_core::centroid::centroid;
///
/// let rays = vec![vec![1.0, 0.0], vec![3.0, 2.0]];
/// assert_eq!(centroid(&rays).unwrap(), vec![2.0, 1.0]);
/// ```
pub fn centroid<V: AsRef<[f64]>>(rays: &[V]) -> HarmonyResult<Vec<f64>> {
    let first = rays.first().ok_or(HarmonyError::EmptyInput)?;
    let dimensions = first.as_ref().len();

    let mut sums = vec![0.0f64; dimensions];
    for ray in rays {
        let ray = ray.as_ref();
        if ray.len() != dimensions {
            return Err(HarmonyError::DimensionMismatch {
                expected: dimensions,
                actual: ray.len(),
            });
        }
        for (sum, value) in sums.iter_mut().zip(ray) {
            *sum += value;
        }
    }

    let count = rays.len() as f64;
    for sum in &mut sums {
        *sum /= count;
    }
    Ok(sums)
}

/// Centroid over fixed 5D rays, dimension guaranteed by the type.
///
/// # Errors
/// [`HarmonyError::EmptyInput`] for zero rays.
pub fn ray_centroid(rays: &[Ray]) -> HarmonyResult<Ray> {
    if rays.is_empty() {
        return Err(HarmonyError::EmptyInput);
    }
    let mut out = [0.0f64; crate::ray::RAY_DIM];
    for ray in rays {
        for (sum, value) in out.iter_mut().zip(ray) {
            *sum += value;
        }
    }
    let count = rays.len() as f64;
    for sum in &mut out {
        *sum /= count;
    }
    Ok(out)
}
