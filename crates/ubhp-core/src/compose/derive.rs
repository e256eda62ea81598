//! Composition primitives: the fixed field-selection rules that lift 5D
//! centroids and rays into higher-dimensional identity vectors.
//!
//! Two distinct derivation styles exist and are named separately:
//! - the **salted** 7D rule ([`salted_seven`]), applied once per domain;
//! - the **non-salted** base-universe rules ([`context_six`],
//!   [`identity_seven`]), applied once for the base-universe branch.
//!
//! Both are exact: the field selections below are protocol constants, not
//! approximations. Everything above 7D is literal concatenation
//! ([`concat`]), so slicing a composed vector at the known component
//! boundaries recovers the original sub-vectors bit-for-bit.

use crate::error::{HarmonyError, HarmonyResult};
use crate::ray::Ray;

/// Dimension of the non-salted base-universe context vector.
pub const CONTEXT_DIM: usize = 6;
/// Dimension of every 7D identity layer.
pub const LAYER_DIM: usize = 7;
/// Dimension of the terminal composed vector (six 7D layers).
pub const UNIVERSE_DIM: usize = 42;

/// Salted 7D derivation: stamp a domain centroid with the domain's seed ray.
///
/// The exact rule is
/// `[c.h, c.sin, c.cos, s.h, s.sin, s.cos, (c.length + s.length) / 2]`
/// where `c` is the domain centroid and `s` the seed ray, both in the
/// `[h, sin, cos, tan, length]` field order of a projected ray.
#[inline]
pub fn salted_seven(centroid: &Ray, seed: &Ray) -> Vec<f64> {
    vec![
        centroid[0],
        centroid[1],
        centroid[2],
        seed[0],
        seed[1],
        seed[2],
        (centroid[4] + seed[4]) / 2.0,
    ]
}

/// Non-salted 6D base-universe context:
/// `[f.h, f.sin, f.cos, d.h, d.sin, d.cos]` for foundation centroid `f` and
/// document ray `d`.
#[inline]
pub fn context_six(centroid: &Ray, document: &Ray) -> Vec<f64> {
    vec![
        centroid[0],
        centroid[1],
        centroid[2],
        document[0],
        document[1],
        document[2],
    ]
}

/// Non-salted 7D base-universe identity: the 6D context extended by the
/// entity ray's norm.
///
/// # Errors
/// [`HarmonyError::DimensionMismatch`] if `context` is not 6D.
pub fn identity_seven(context: &[f64], entity: &Ray) -> HarmonyResult<Vec<f64>> {
    if context.len() != CONTEXT_DIM {
        return Err(HarmonyError::DimensionMismatch {
            expected: CONTEXT_DIM,
            actual: context.len(),
        });
    }
    let mut out = Vec::with_capacity(LAYER_DIM);
    out.extend_from_slice(context);
    out.push(entity[0]);
    Ok(out)
}

/// Literal concatenation of previously derived vectors, in the given order.
pub fn concat(parts: &[&[f64]]) -> Vec<f64> {
    let total: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

/// Tetrahedral spin: fold five points into a 6D phase vector.
///
/// `[a+b-c, b+c-d, c+d-e, d+e-a, e+a-b, (a+b+c+d+e)/π]` — the first five
/// components are the rotating phase differences, the last the central axis.
#[inline]
pub fn tetrahedral_spin(points: &Ray) -> [f64; 6] {
    let [a, b, c, d, e] = *points;
    [
        a + b - c,
        b + c - d,
        c + d - e,
        d + e - a,
        e + a - b,
        (a + b + c + d + e) / std::f64::consts::PI,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salted_seven_matches_the_fixed_rule_exactly() {
        let c: Ray = [2.0, 0.1, 0.2, 0.3, 8.0];
        let s: Ray = [3.0, 0.4, 0.5, 0.6, 9.0];
        assert_eq!(
            salted_seven(&c, &s),
            vec![2.0, 0.1, 0.2, 3.0, 0.4, 0.5, 8.5]
        );
    }

    #[test]
    fn salted_seven_ignores_tan_components() {
        let mut c: Ray = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut s: Ray = [6.0, 7.0, 8.0, 9.0, 10.0];
        let base = salted_seven(&c, &s);
        c[3] = 1e9;
        s[3] = -1e9;
        assert_eq!(salted_seven(&c, &s), base);
    }

    #[test]
    fn context_six_selects_h_sin_cos_pairs() {
        let f: Ray = [1.0, 2.0, 3.0, 4.0, 5.0];
        let d: Ray = [6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(context_six(&f, &d), vec![1.0, 2.0, 3.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn identity_seven_appends_entity_norm() {
        let context = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let entity: Ray = [9.0, 0.0, 0.0, 0.0, 0.0];
        let identity = identity_seven(&context, &entity).unwrap();
        assert_eq!(identity, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 9.0]);
    }

    #[test]
    fn identity_seven_rejects_wrong_context_dimension() {
        let entity: Ray = [0.0; 5];
        let result = identity_seven(&[1.0, 2.0], &entity);
        assert!(matches!(
            result,
            Err(HarmonyError::DimensionMismatch { expected: 6, actual: 2 })
        ));
    }

    #[test]
    fn concat_then_slice_recovers_components_exactly() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let b = vec![8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0];
        let joined = concat(&[&a, &b]);
        assert_eq!(joined.len(), 14);
        assert_eq!(&joined[0..7], a.as_slice());
        assert_eq!(&joined[7..14], b.as_slice());
    }

    #[test]
    fn tetrahedral_spin_arithmetic() {
        let points: Ray = [1.0, 2.0, 3.0, 4.0, 5.0];
        let spin = tetrahedral_spin(&points);
        assert_eq!(spin[0], 0.0); // 1+2-3
        assert_eq!(spin[1], 1.0); // 2+3-4
        assert_eq!(spin[2], 2.0); // 3+4-5
        assert_eq!(spin[3], 8.0); // 4+5-1
        assert_eq!(spin[4], 4.0); // 5+1-2
        assert!((spin[5] - 15.0 / std::f64::consts::PI).abs() < 1e-12);
    }
}
