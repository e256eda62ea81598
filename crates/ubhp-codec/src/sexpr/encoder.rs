//! Stateful canonical encoder.
//!
//! `CanonicalEncoder` accumulates encoded tagged values into one owned byte
//! buffer. All writers take `&mut self`; [`CanonicalEncoder::finalize`]
//! consumes the encoder and returns the immutable snapshot, so a buffer can
//! never be observed mid-write.

use crate::varint::encode_varint;

use super::{ModelWeights, SExpr, SExprTag, SeedTransform, SignatureRecord};

/// Single-owner accumulator producing the canonical byte form.
///
/// Lifecycle: create, write any number of values, [`finalize`], discard.
/// Not safe to share across concurrent writers.
///
/// # Example
/// ```
/// use ubhp_codec::CanonicalEncoder;
///
/// let mut enc = CanonicalEncoder::new();
/// enc.encode_string("hello");
/// let bytes = enc.finalize();
/// assert_eq!(bytes[0], 0x06); // String tag
/// assert_eq!(bytes[1], 5);    // varint UTF-8 length
/// ```
#[derive(Debug, Default)]
pub struct CanonicalEncoder {
    buffer: Vec<u8>,
}

impl CanonicalEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes accumulated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when nothing has been encoded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the encoder and return the immutable canonical buffer.
    pub fn finalize(self) -> Vec<u8> {
        self.buffer
    }

    /// Append a null value.
    pub fn encode_null(&mut self) {
        self.buffer.push(SExprTag::Null as u8);
    }

    /// Append a boolean.
    pub fn encode_bool(&mut self, value: bool) {
        self.buffer.push(SExprTag::Bool as u8);
        self.buffer.push(u8::from(value));
    }

    /// Append a 32-bit signed integer, little-endian two's complement.
    pub fn encode_i32(&mut self, value: i32) {
        self.buffer.push(SExprTag::Int32 as u8);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a 64-bit signed integer, little-endian two's complement.
    pub fn encode_i64(&mut self, value: i64) {
        self.buffer.push(SExprTag::Int64 as u8);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a single-precision float, IEEE-754 little-endian.
    pub fn encode_f32(&mut self, value: f32) {
        self.buffer.push(SExprTag::Float32 as u8);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a double-precision float, IEEE-754 little-endian.
    pub fn encode_f64(&mut self, value: f64) {
        self.buffer.push(SExprTag::Float64 as u8);
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a UTF-8 string: tag, varint byte length, bytes.
    pub fn encode_string(&mut self, value: &str) {
        self.encode_text(SExprTag::String, value);
    }

    /// Append a symbol: same layout as a string under the Symbol tag.
    pub fn encode_symbol(&mut self, value: &str) {
        self.encode_text(SExprTag::Symbol, value);
    }

    fn encode_text(&mut self, tag: SExprTag, value: &str) {
        self.buffer.push(tag as u8);
        self.append_len_prefixed(value.as_bytes());
    }

    /// Append a list of already-encoded child values.
    ///
    /// The length prefix is the TOTAL byte length of all children
    /// concatenated. Each element must itself be a complete tagged span
    /// (e.g. produced by another encoder's [`finalize`]); otherwise the
    /// resulting buffer cannot be parsed back into elements.
    ///
    /// [`finalize`]: CanonicalEncoder::finalize
    pub fn encode_list<B: AsRef<[u8]>>(&mut self, elements: &[B]) {
        self.buffer.push(SExprTag::List as u8);
        let total: usize = elements.iter().map(|e| e.as_ref().len()).sum();
        self.buffer.extend_from_slice(&encode_varint(total as u64));
        for element in elements {
            self.buffer.extend_from_slice(element.as_ref());
        }
    }

    /// Append a lambda body as opaque length-prefixed bytes.
    pub fn encode_lambda(&mut self, body: &[u8]) {
        self.buffer.push(SExprTag::Lambda as u8);
        self.append_len_prefixed(body);
    }

    /// Append a content-address reference as opaque length-prefixed bytes.
    pub fn encode_reference(&mut self, content_address: &[u8]) {
        self.buffer.push(SExprTag::Reference as u8);
        self.append_len_prefixed(content_address);
    }

    /// Append a model-weights composite record.
    ///
    /// Layout: tag, id, weights, nested seed-transform record, then the
    /// untagged harmonic-signature sub-record.
    pub fn encode_model_weights(&mut self, weights: &ModelWeights) {
        self.buffer.push(SExprTag::ModelWeights as u8);
        self.append_len_prefixed(weights.id.as_bytes());
        self.append_len_prefixed(&weights.weights);
        self.encode_seed_transform(&weights.seed_transform);
        self.encode_signature_record(&weights.signature);
    }

    /// Append a standalone seed-transform record.
    pub fn encode_seed_transform(&mut self, transform: &SeedTransform) {
        self.buffer.push(SExprTag::SeedTransform as u8);
        // Feature buffers are COUNT-prefixed, unlike List's byte-length
        // framing, then each buffer carries its own length prefix.
        self.buffer
            .extend_from_slice(&encode_varint(transform.features.len() as u64));
        for feature in &transform.features {
            self.append_len_prefixed(feature);
        }
        let mut matrix_bytes = Vec::with_capacity(transform.transform_matrix.len() * 4);
        for cell in &transform.transform_matrix {
            matrix_bytes.extend_from_slice(&cell.to_le_bytes());
        }
        self.append_len_prefixed(&matrix_bytes);
        self.buffer
            .extend_from_slice(&transform.consensus_threshold.to_le_bytes());
    }

    fn encode_signature_record(&mut self, signature: &SignatureRecord) {
        self.append_len_prefixed(signature.id.as_bytes());
        let values = [
            f64::from(signature.length),
            signature.sin,
            signature.cos,
            signature.tan,
            signature.h,
        ];
        for value in values {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
        self.append_len_prefixed(&signature.buffer);
    }

    /// Append any decoded value, recursing through lists.
    ///
    /// Convenience round-trip companion to [`decode_value`]; the byte output
    /// is identical to calling the per-kind writers by hand.
    ///
    /// [`decode_value`]: super::decode_value
    pub fn encode_value(&mut self, value: &SExpr) {
        match value {
            SExpr::Null => self.encode_null(),
            SExpr::Bool(b) => self.encode_bool(*b),
            SExpr::Int32(v) => self.encode_i32(*v),
            SExpr::Int64(v) => self.encode_i64(*v),
            SExpr::Float32(v) => self.encode_f32(*v),
            SExpr::Float64(v) => self.encode_f64(*v),
            SExpr::String(s) => self.encode_string(s),
            SExpr::Symbol(s) => self.encode_symbol(s),
            SExpr::List(children) => {
                let encoded: Vec<Vec<u8>> = children
                    .iter()
                    .map(|child| {
                        let mut sub = CanonicalEncoder::new();
                        sub.encode_value(child);
                        sub.finalize()
                    })
                    .collect();
                self.encode_list(&encoded);
            }
            SExpr::Lambda(body) => self.encode_lambda(body),
            SExpr::Reference(addr) => self.encode_reference(addr),
            SExpr::ModelWeights(mw) => self.encode_model_weights(mw),
            SExpr::SeedTransform(st) => self.encode_seed_transform(st),
        }
    }

    fn append_len_prefixed(&mut self, bytes: &[u8]) {
        self.buffer
            .extend_from_slice(&encode_varint(bytes.len() as u64));
        self.buffer.extend_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_a_single_tag_byte() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_null();
        assert_eq!(enc.finalize(), vec![0x00]);
    }

    #[test]
    fn bool_layout() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_bool(true);
        enc.encode_bool(false);
        assert_eq!(enc.finalize(), vec![0x01, 0x01, 0x01, 0x00]);
    }

    #[test]
    fn i32_is_little_endian() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_i32(0x0102_0304);
        assert_eq!(enc.finalize(), vec![0x02, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn i64_negative_is_twos_complement() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_i64(-1);
        let bytes = enc.finalize();
        assert_eq!(bytes[0], 0x03);
        assert_eq!(&bytes[1..], &[0xFF; 8]);
    }

    #[test]
    fn f64_payload_matches_to_le_bytes() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_f64(std::f64::consts::PI);
        let bytes = enc.finalize();
        assert_eq!(bytes[0], 0x05);
        assert_eq!(&bytes[1..], &std::f64::consts::PI.to_le_bytes());
    }

    #[test]
    fn string_layout_counts_utf8_bytes() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_string("héllo");
        let bytes = enc.finalize();
        assert_eq!(bytes[0], 0x06);
        assert_eq!(bytes[1], 6); // 'é' is two UTF-8 bytes
        assert_eq!(&bytes[2..], "héllo".as_bytes());
    }

    #[test]
    fn list_length_is_total_child_bytes_not_count() {
        let mut child = CanonicalEncoder::new();
        child.encode_i32(7);
        let child_bytes = child.finalize(); // 5 bytes

        let mut enc = CanonicalEncoder::new();
        enc.encode_list(&[child_bytes.clone(), child_bytes.clone(), child_bytes]);
        let bytes = enc.finalize();
        assert_eq!(bytes[0], 0x08);
        assert_eq!(bytes[1], 15); // 3 children x 5 bytes, NOT 3
        assert_eq!(bytes.len(), 2 + 15);
    }

    #[test]
    fn lambda_body_is_opaque() {
        let source = "(lambda (x) x)";
        let mut enc = CanonicalEncoder::new();
        enc.encode_lambda(source.as_bytes());
        let bytes = enc.finalize();
        assert_eq!(bytes[0], 0x09);
        assert_eq!(bytes[1] as usize, source.len());
        assert_eq!(&bytes[2..], source.as_bytes());
    }

    #[test]
    fn finalize_snapshot_is_stable() {
        let mut enc = CanonicalEncoder::new();
        enc.encode_symbol("quadrant");
        let a = {
            let mut enc2 = CanonicalEncoder::new();
            enc2.encode_symbol("quadrant");
            enc2.finalize()
        };
        assert_eq!(enc.finalize(), a);
    }

    #[test]
    fn encode_value_matches_direct_writers() {
        let mut direct = CanonicalEncoder::new();
        direct.encode_string("abc");
        direct.encode_i64(42);

        let mut via_value = CanonicalEncoder::new();
        via_value.encode_value(&SExpr::String("abc".into()));
        via_value.encode_value(&SExpr::Int64(42));

        assert_eq!(direct.finalize(), via_value.finalize());
    }
}
