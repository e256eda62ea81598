//! Tagged S-expression values and their canonical byte form.
//!
//! The tag set is fixed by the wire format: thirteen variants covering null,
//! booleans, fixed-width numerics, text, symbols, composites, and the two
//! domain-specific records ([`ModelWeights`], [`SeedTransform`]). Encoding
//! lives in [`encoder`], the symmetric recursive-descent decoder in
//! [`decoder`].

mod decoder;
mod encoder;

pub use decoder::decode_value;
pub use encoder::CanonicalEncoder;

use serde::{Deserialize, Serialize};

/// Wire tag for each canonical value kind.
///
/// The discriminant IS the first byte of the encoded span. Values are stable
/// protocol constants and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SExprTag {
    /// Absent value, tag only.
    Null = 0x00,
    /// Boolean, one payload byte (0 or 1).
    Bool = 0x01,
    /// 32-bit signed integer, little-endian two's complement.
    Int32 = 0x02,
    /// 64-bit signed integer, little-endian two's complement.
    Int64 = 0x03,
    /// IEEE-754 single-precision float, little-endian.
    Float32 = 0x04,
    /// IEEE-754 double-precision float, little-endian.
    Float64 = 0x05,
    /// UTF-8 string, varint length prefix.
    String = 0x06,
    /// Lisp-style symbol, UTF-8 with varint length prefix.
    Symbol = 0x07,
    /// Ordered sequence of complete tagged values; the length prefix counts
    /// total child bytes, not children.
    List = 0x08,
    /// Executable body carried as opaque length-prefixed bytes.
    Lambda = 0x09,
    /// Content-address reference, opaque length-prefixed bytes.
    Reference = 0x0A,
    /// Serialized model-weights composite record.
    ModelWeights = 0x0B,
    /// Seed-transformation composite record.
    SeedTransform = 0x0C,
}

impl SExprTag {
    /// All tags in wire order.
    pub fn all() -> [SExprTag; 13] {
        [
            Self::Null,
            Self::Bool,
            Self::Int32,
            Self::Int64,
            Self::Float32,
            Self::Float64,
            Self::String,
            Self::Symbol,
            Self::List,
            Self::Lambda,
            Self::Reference,
            Self::ModelWeights,
            Self::SeedTransform,
        ]
    }

    /// Map a wire byte back to its tag, `None` for unassigned bytes.
    #[inline]
    pub fn from_byte(byte: u8) -> Option<SExprTag> {
        match byte {
            0x00 => Some(Self::Null),
            0x01 => Some(Self::Bool),
            0x02 => Some(Self::Int32),
            0x03 => Some(Self::Int64),
            0x04 => Some(Self::Float32),
            0x05 => Some(Self::Float64),
            0x06 => Some(Self::String),
            0x07 => Some(Self::Symbol),
            0x08 => Some(Self::List),
            0x09 => Some(Self::Lambda),
            0x0A => Some(Self::Reference),
            0x0B => Some(Self::ModelWeights),
            0x0C => Some(Self::SeedTransform),
            _ => None,
        }
    }
}

/// A decoded canonical value.
///
/// `Lambda` and `Reference` payloads stay opaque: the encoder accepts raw
/// UTF-8 lambda source bodies, so the decoder cannot assume a nested tagged
/// value inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SExpr {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Symbol(String),
    List(Vec<SExpr>),
    Lambda(Vec<u8>),
    Reference(Vec<u8>),
    ModelWeights(ModelWeights),
    SeedTransform(SeedTransform),
}

impl SExpr {
    /// The wire tag this value encodes under.
    pub fn tag(&self) -> SExprTag {
        match self {
            Self::Null => SExprTag::Null,
            Self::Bool(_) => SExprTag::Bool,
            Self::Int32(_) => SExprTag::Int32,
            Self::Int64(_) => SExprTag::Int64,
            Self::Float32(_) => SExprTag::Float32,
            Self::Float64(_) => SExprTag::Float64,
            Self::String(_) => SExprTag::String,
            Self::Symbol(_) => SExprTag::Symbol,
            Self::List(_) => SExprTag::List,
            Self::Lambda(_) => SExprTag::Lambda,
            Self::Reference(_) => SExprTag::Reference,
            Self::ModelWeights(_) => SExprTag::ModelWeights,
            Self::SeedTransform(_) => SExprTag::SeedTransform,
        }
    }
}

/// Seed-transformation record: feature buffers, a flat f32 transform matrix,
/// and a consensus threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTransform {
    /// Opaque feature buffers, count-prefixed on the wire.
    pub features: Vec<Vec<u8>>,
    /// Row-major matrix cells; the wire stores the byte length, which must be
    /// a multiple of 4.
    pub transform_matrix: Vec<f32>,
    /// Consensus threshold, 8-byte little-endian f64 on the wire.
    pub consensus_threshold: f64,
}

/// Harmonic-signature sub-record as embedded in [`ModelWeights`].
///
/// The five numeric fields travel as f64 little-endian in the fixed order
/// `length, sin, cos, tan, h`. This record carries no leading tag byte; it
/// only ever appears as the trailing section of a `ModelWeights` span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Deterministic content identifier.
    pub id: String,
    /// Byte length of the fingerprinted buffer.
    pub length: u32,
    pub sin: f64,
    pub cos: f64,
    pub tan: f64,
    /// Euclidean norm of the fingerprinted bytes.
    pub h: f64,
    /// The fingerprinted buffer itself.
    pub buffer: Vec<u8>,
}

/// Model-weights composite record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    /// Model identifier.
    pub id: String,
    /// Raw serialized weights.
    pub weights: Vec<u8>,
    /// Nested seed-transformation record.
    pub seed_transform: SeedTransform,
    /// Harmonic signature of the weights.
    pub signature: SignatureRecord,
}
