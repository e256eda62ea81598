//! Harmonic signature function.
//!
//! Maps a byte sequence (optionally combined with a shared "origin"
//! sequence) to a fixed numeric fingerprint: the Euclidean norm of the byte
//! values plus three trigonometric transforms of it, and a deterministic
//! identifier derived from those values alone.
//!
//! # Determinism
//!
//! Identical `(buffer, origin)` pairs always yield bit-identical
//! `(h, sin, cos, tan, id)`. No wall-clock or random component may enter the
//! identifier; the fingerprint is a pure function of content.

use serde::{Deserialize, Serialize};
use ubhp_codec::SignatureRecord;

/// Golden ratio `(1 + √5) / 2` as f64, the divisor of the cosine transform.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Substitute norm used when a buffer's Euclidean norm is exactly zero, so
/// the tangent transform stays finite. A defined numeric policy, not an
/// error condition.
pub const ZERO_NORM_EPSILON: f64 = 1e-10;

/// Deterministic fingerprint of a byte sequence.
///
/// `h` is the Euclidean norm of the (possibly origin-XORed) byte values;
/// `sin`, `cos`, `tan` are fixed trigonometric transforms of `h`. The
/// `buffer` field holds the ORIGINAL input bytes, not the XORed working
/// values. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicVector {
    /// Deterministic content identifier, `UBHP_{h}_{sin}_{cos}_{byte_len}`.
    pub id: String,
    /// Byte length of the input (saturating at `u32::MAX`).
    pub length: u32,
    /// `sin(h / π)`
    pub sin: f64,
    /// `cos(h / φ)`
    pub cos: f64,
    /// `tan(π / h)`, with the zero-norm epsilon guard
    pub tan: f64,
    /// Euclidean norm of the byte values
    pub h: f64,
    /// The fingerprinted input bytes
    pub buffer: Vec<u8>,
}

impl From<&HarmonicVector> for SignatureRecord {
    fn from(hv: &HarmonicVector) -> Self {
        SignatureRecord {
            id: hv.id.clone(),
            length: hv.length,
            sin: hv.sin,
            cos: hv.cos,
            tan: hv.tan,
            h: hv.h,
            buffer: hv.buffer.clone(),
        }
    }
}

/// Fingerprint a byte sequence.
///
/// # Example
/// ```
/// use ubhp_core::harmonic::harmonize;
///
/// let a = harmonize(b"(lambda (x) x)");
/// let b = harmonize(b"(lambda (x) x)");
/// assert_eq!(a.id, b.id);
/// assert_eq!(a.h.to_bits(), b.h.to_bits());
/// ```
pub fn harmonize(buffer: &[u8]) -> HarmonicVector {
    harmonize_with_origin(buffer, None)
}

/// Fingerprint a byte sequence against a shared origin.
///
/// Each input byte is XORed with the origin byte at the same index, wrapping
/// modulo the origin length. Two parties that agree on the same origin derive
/// the same fingerprint family; without the origin the fingerprints differ.
/// An empty origin is a no-op, equivalent to passing `None`.
pub fn harmonize_with_origin(buffer: &[u8], origin: Option<&[u8]>) -> HarmonicVector {
    let sum_sq: f64 = match origin {
        Some(origin) if !origin.is_empty() => buffer
            .iter()
            .enumerate()
            .map(|(i, &byte)| {
                let v = f64::from(byte ^ origin[i % origin.len()]);
                v * v
            })
            .sum(),
        _ => buffer.iter().map(|&byte| f64::from(byte).powi(2)).sum(),
    };

    let h = sum_sq.sqrt();
    let sin = (h / std::f64::consts::PI).sin();
    let cos = (h / PHI).cos();
    let guarded = if h == 0.0 { ZERO_NORM_EPSILON } else { h };
    let tan = (std::f64::consts::PI / guarded).tan();

    let id = format!("UBHP_{h:.8}_{sin:.8}_{cos:.8}_{}", buffer.len());

    HarmonicVector {
        id,
        length: u32::try_from(buffer.len()).unwrap_or(u32::MAX),
        sin,
        cos,
        tan,
        h,
        buffer: buffer.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinism_bit_identical() {
        let bytes = "(lambda (x) x)".as_bytes();
        let a = harmonize(bytes);
        let b = harmonize(bytes);
        assert_eq!(a.id, b.id);
        assert_eq!(a.h.to_bits(), b.h.to_bits());
        assert_eq!(a.sin.to_bits(), b.sin.to_bits());
        assert_eq!(a.cos.to_bits(), b.cos.to_bits());
        assert_eq!(a.tan.to_bits(), b.tan.to_bits());
    }

    #[test]
    fn zero_length_guard_keeps_tan_finite() {
        let hv = harmonize(&[]);
        assert_eq!(hv.h, 0.0);
        assert_eq!(hv.length, 0);
        assert!(hv.tan.is_finite());
        assert_eq!(hv.sin, 0.0);
        assert_eq!(hv.cos, 1.0);
    }

    #[test]
    fn all_zero_bytes_also_hit_the_guard() {
        // Non-empty buffer whose norm is still zero.
        let hv = harmonize(&[0u8; 16]);
        assert_eq!(hv.h, 0.0);
        assert!(hv.tan.is_finite());
        assert_eq!(hv.length, 16);
    }

    #[test]
    fn id_is_pure_function_of_content() {
        let hv = harmonize(&[3, 4]);
        assert_eq!(hv.h, 5.0);
        assert_eq!(hv.id, format!("UBHP_{:.8}_{:.8}_{:.8}_2", hv.h, hv.sin, hv.cos));
    }

    #[test]
    fn buffer_field_holds_original_bytes_even_with_origin() {
        let input = [1u8, 2, 3, 4];
        let origin = [0xFFu8];
        let hv = harmonize_with_origin(&input, Some(&origin));
        assert_eq!(hv.buffer, input);
    }

    #[test]
    fn origin_changes_the_fingerprint_reproducibly() {
        let input = b"consensus payload";
        let origin = b"shared-context";

        let plain = harmonize(input);
        let salted_a = harmonize_with_origin(input, Some(origin));
        let salted_b = harmonize_with_origin(input, Some(origin));

        assert_eq!(salted_a, salted_b);
        assert_ne!(plain.h.to_bits(), salted_a.h.to_bits());
        assert_ne!(plain.id, salted_a.id);
    }

    #[test]
    fn origin_index_wraps_modulo_origin_length() {
        // Origin [0xFF] flips every byte regardless of input length.
        let input = [0x0Fu8; 7];
        let hv = harmonize_with_origin(&input, Some(&[0xFF]));
        let expected_h = (7.0f64 * f64::from(0xF0u8).powi(2)).sqrt();
        assert_eq!(hv.h.to_bits(), expected_h.to_bits());
    }

    #[test]
    fn empty_origin_is_a_no_op() {
        let input = b"payload";
        let plain = harmonize(input);
        let with_empty = harmonize_with_origin(input, Some(&[]));
        assert_eq!(plain, with_empty);
    }

    #[test]
    fn signature_record_conversion_preserves_fields() {
        let hv = harmonize(b"weights");
        let record = SignatureRecord::from(&hv);
        assert_eq!(record.id, hv.id);
        assert_eq!(record.length, hv.length);
        assert_eq!(record.h.to_bits(), hv.h.to_bits());
        assert_eq!(record.buffer, hv.buffer);
    }
}
