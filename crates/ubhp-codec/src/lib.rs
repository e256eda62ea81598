//! Canonical S-expression wire format for the Universal Binary Harmony
//! Protocol.
//!
//! Every value on the wire is a self-describing tagged span: the first byte
//! is the tag, and the remaining bytes are either fixed-width (numerics) or
//! length-prefixed (text, composites). Tag plus declared length fully
//! determine the byte span, so a buffer of concatenated values can be parsed
//! recursively without external context.
//!
//! # Wire Layout
//!
//! | Value | Layout |
//! |-------|--------|
//! | `Null` | `[0x00]` |
//! | `Bool` | `[0x01][0x00 or 0x01]` |
//! | `Int32` / `Float32` | `[tag][4 bytes LE]` |
//! | `Int64` / `Float64` | `[tag][8 bytes LE]` |
//! | `String` / `Symbol` | `[tag][varint utf8-len][utf8 bytes]` |
//! | `List` | `[tag][varint total child bytes][child0][child1]...` |
//! | `Lambda` / `Reference` | `[tag][varint len][opaque bytes]` |
//! | `ModelWeights` | fixed-shape composite, see [`sexpr::ModelWeights`] |
//!
//! Note the `List` length field counts the **total concatenated child
//! bytes**, not the number of children. Element boundaries are recovered by
//! parsing each child's own tag and length, which is only unambiguous when
//! every child is itself a complete tagged value. [`sexpr::CanonicalEncoder`]
//! guarantees this for buffers it produces.
//!
//! # Ownership
//!
//! [`sexpr::CanonicalEncoder`] is a single-owner accumulator: create, write,
//! [`finalize`](sexpr::CanonicalEncoder::finalize), discard. It is not safe
//! to share across concurrent writers. Decoding is a pure function over a
//! byte slice and may run freely in parallel.

pub mod error;
pub mod sexpr;
pub mod varint;

pub use error::{CodecError, CodecResult};
pub use sexpr::{
    decode_value, CanonicalEncoder, ModelWeights, SExpr, SExprTag, SeedTransform, SignatureRecord,
};
pub use varint::{decode_varint, encode_varint};
