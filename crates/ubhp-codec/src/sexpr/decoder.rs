//! Recursive-descent decoder for the canonical byte format.
//!
//! Symmetric to [`CanonicalEncoder`](super::CanonicalEncoder): every span is
//! parsed from its tag byte, and composite spans recurse. All reads are
//! bounds-checked; malformed input yields a typed [`CodecError`], never a
//! panic and never a silently short value.

use crate::error::{CodecError, CodecResult, MAX_PAYLOAD_LEN};
use crate::varint::decode_varint;

use super::{ModelWeights, SExpr, SExprTag, SeedTransform, SignatureRecord};

/// Decode one tagged value starting at `offset`.
///
/// Returns the value and the number of bytes it occupied, so a buffer of
/// concatenated values can be walked by advancing the offset.
///
/// # Errors
/// - [`CodecError::UnexpectedEof`] when the buffer ends inside a span
/// - [`CodecError::UnknownTag`] for an unassigned tag byte
/// - [`CodecError::VarIntTruncated`] / [`CodecError::LengthOverflow`] for
///   malformed or oversized length prefixes
/// - [`CodecError::InvalidUtf8`] for non-UTF-8 String/Symbol payloads
///
/// # Example
/// ```
/// use ubhp_codec::{decode_value, CanonicalEncoder, SExpr};
///
/// let mut enc = CanonicalEncoder::new();
/// enc.encode_string("ray");
/// let bytes = enc.finalize();
///
/// let (value, consumed) = decode_value(&bytes, 0).unwrap();
/// assert_eq!(value, SExpr::String("ray".into()));
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn decode_value(buf: &[u8], offset: usize) -> CodecResult<(SExpr, usize)> {
    let tag_byte = read_byte(buf, offset)?;
    let tag = SExprTag::from_byte(tag_byte).ok_or(CodecError::UnknownTag {
        tag: tag_byte,
        offset,
    })?;
    let mut pos = offset + 1;

    let value = match tag {
        SExprTag::Null => SExpr::Null,
        SExprTag::Bool => {
            let byte = read_byte(buf, pos)?;
            pos += 1;
            SExpr::Bool(byte != 0)
        }
        SExprTag::Int32 => {
            let bytes = read_array::<4>(buf, pos)?;
            pos += 4;
            SExpr::Int32(i32::from_le_bytes(bytes))
        }
        SExprTag::Int64 => {
            let bytes = read_array::<8>(buf, pos)?;
            pos += 8;
            SExpr::Int64(i64::from_le_bytes(bytes))
        }
        SExprTag::Float32 => {
            let bytes = read_array::<4>(buf, pos)?;
            pos += 4;
            SExpr::Float32(f32::from_le_bytes(bytes))
        }
        SExprTag::Float64 => {
            let bytes = read_array::<8>(buf, pos)?;
            pos += 8;
            SExpr::Float64(f64::from_le_bytes(bytes))
        }
        SExprTag::String => {
            let (text, next) = read_text(buf, pos)?;
            pos = next;
            SExpr::String(text)
        }
        SExprTag::Symbol => {
            let (text, next) = read_text(buf, pos)?;
            pos = next;
            SExpr::Symbol(text)
        }
        SExprTag::List => {
            let (total_len, next) = read_len(buf, pos)?;
            pos = next;
            let end = checked_end(buf, pos, total_len)?;
            let mut children = Vec::new();
            let mut child_pos = pos;
            // Child boundaries are recovered by recursive parsing; limiting
            // the slice to the declared span turns any overrunning child
            // into UnexpectedEof instead of a silent read past the list.
            while child_pos < end {
                let (child, consumed) = decode_value(&buf[..end], child_pos)?;
                children.push(child);
                child_pos += consumed;
            }
            pos = end;
            SExpr::List(children)
        }
        SExprTag::Lambda => {
            let (body, next) = read_bytes(buf, pos)?;
            pos = next;
            SExpr::Lambda(body.to_vec())
        }
        SExprTag::Reference => {
            let (addr, next) = read_bytes(buf, pos)?;
            pos = next;
            SExpr::Reference(addr.to_vec())
        }
        SExprTag::ModelWeights => {
            let (record, next) = decode_model_weights_body(buf, pos)?;
            pos = next;
            SExpr::ModelWeights(record)
        }
        SExprTag::SeedTransform => {
            let (record, next) = decode_seed_transform_body(buf, pos)?;
            pos = next;
            SExpr::SeedTransform(record)
        }
    };

    Ok((value, pos - offset))
}

fn decode_model_weights_body(buf: &[u8], offset: usize) -> CodecResult<(ModelWeights, usize)> {
    let mut pos = offset;
    let (id, next) = read_text(buf, pos)?;
    pos = next;
    let (weights, next) = read_bytes(buf, pos)?;
    let weights = weights.to_vec();
    pos = next;

    // The nested record carries its own tag byte on the wire.
    let st_tag = read_byte(buf, pos)?;
    if st_tag != SExprTag::SeedTransform as u8 {
        return Err(CodecError::UnknownTag {
            tag: st_tag,
            offset: pos,
        });
    }
    pos += 1;
    let (seed_transform, next) = decode_seed_transform_body(buf, pos)?;
    pos = next;

    let (signature, next) = decode_signature_record(buf, pos)?;
    pos = next;

    Ok((
        ModelWeights {
            id,
            weights,
            seed_transform,
            signature,
        },
        pos,
    ))
}

fn decode_seed_transform_body(buf: &[u8], offset: usize) -> CodecResult<(SeedTransform, usize)> {
    let mut pos = offset;
    let (feature_count, next) = read_len(buf, pos)?;
    pos = next;

    let mut features = Vec::with_capacity(feature_count.min(64));
    for _ in 0..feature_count {
        let (feature, next) = read_bytes(buf, pos)?;
        features.push(feature.to_vec());
        pos = next;
    }

    let matrix_offset = pos;
    let (matrix_bytes, next) = read_bytes(buf, pos)?;
    if matrix_bytes.len() % 4 != 0 {
        return Err(CodecError::LengthOverflow {
            length: matrix_bytes.len() as u64,
            offset: matrix_offset,
            max: MAX_PAYLOAD_LEN,
        });
    }
    let transform_matrix: Vec<f32> = matrix_bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    pos = next;

    let threshold_bytes = read_array::<8>(buf, pos)?;
    pos += 8;

    Ok((
        SeedTransform {
            features,
            transform_matrix,
            consensus_threshold: f64::from_le_bytes(threshold_bytes),
        },
        pos,
    ))
}

fn decode_signature_record(buf: &[u8], offset: usize) -> CodecResult<(SignatureRecord, usize)> {
    let mut pos = offset;
    let (id, next) = read_text(buf, pos)?;
    pos = next;

    let length_offset = pos;
    let mut values = [0.0f64; 5];
    for value in &mut values {
        let bytes = read_array::<8>(buf, pos)?;
        *value = f64::from_le_bytes(bytes);
        pos += 8;
    }
    let [raw_length, sin, cos, tan, h] = values;

    // The wire carries the byte length as f64; it must fit the u32 field.
    if !(0.0..=f64::from(u32::MAX)).contains(&raw_length) {
        return Err(CodecError::LengthOverflow {
            length: if raw_length.is_finite() && raw_length > 0.0 {
                raw_length as u64
            } else {
                0
            },
            offset: length_offset,
            max: MAX_PAYLOAD_LEN,
        });
    }

    let (buffer, next) = read_bytes(buf, pos)?;
    let buffer = buffer.to_vec();
    pos = next;

    Ok((
        SignatureRecord {
            id,
            length: raw_length as u32,
            sin,
            cos,
            tan,
            h,
            buffer,
        },
        pos,
    ))
}

#[inline]
fn read_byte(buf: &[u8], pos: usize) -> CodecResult<u8> {
    buf.get(pos).copied().ok_or(CodecError::UnexpectedEof {
        offset: pos,
        needed: 1,
    })
}

fn read_array<const N: usize>(buf: &[u8], pos: usize) -> CodecResult<[u8; N]> {
    let end = pos.checked_add(N).ok_or(CodecError::UnexpectedEof {
        offset: pos,
        needed: N,
    })?;
    let slice = buf.get(pos..end).ok_or_else(|| CodecError::UnexpectedEof {
        offset: buf.len(),
        needed: end - buf.len(),
    })?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Ok(out)
}

/// Decode a length prefix, enforcing the [`MAX_PAYLOAD_LEN`] cap before any
/// allocation happens on its behalf.
fn read_len(buf: &[u8], pos: usize) -> CodecResult<(usize, usize)> {
    let (raw, consumed) = decode_varint(buf, pos)?;
    if raw > MAX_PAYLOAD_LEN {
        return Err(CodecError::LengthOverflow {
            length: raw,
            offset: pos,
            max: MAX_PAYLOAD_LEN,
        });
    }
    Ok((raw as usize, pos + consumed))
}

fn checked_end(buf: &[u8], pos: usize, len: usize) -> CodecResult<usize> {
    let end = pos.checked_add(len).ok_or(CodecError::UnexpectedEof {
        offset: pos,
        needed: len,
    })?;
    if end > buf.len() {
        return Err(CodecError::UnexpectedEof {
            offset: buf.len(),
            needed: end - buf.len(),
        });
    }
    Ok(end)
}

fn read_bytes(buf: &[u8], pos: usize) -> CodecResult<(&[u8], usize)> {
    let (len, payload_start) = read_len(buf, pos)?;
    let end = checked_end(buf, payload_start, len)?;
    Ok((&buf[payload_start..end], end))
}

fn read_text(buf: &[u8], pos: usize) -> CodecResult<(String, usize)> {
    let (bytes, next) = read_bytes(buf, pos)?;
    let text = std::str::from_utf8(bytes)
        .map_err(|_| CodecError::InvalidUtf8 { offset: pos })?
        .to_owned();
    Ok((text, next))
}
