//! Error taxonomy for the canonical wire format.

use thiserror::Error;

/// Maximum value accepted for any length prefix in the TLV stream.
///
/// The encoder can in principle emit longer spans on a 64-bit host, but the
/// decoder rejects anything above this cap so that a hostile buffer cannot
/// request an absurd allocation from a few bytes of input.
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64;

/// Errors produced while decoding the canonical byte format.
///
/// Every failure is recoverable by the caller: the decoder never panics on
/// malformed input and never silently truncates a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer ended in the middle of a variable-length integer.
    #[error("varint truncated: buffer ended before terminating byte (started at offset {offset})")]
    VarIntTruncated {
        /// Offset at which the varint began
        offset: usize,
    },

    /// Buffer ended before a declared payload was complete.
    #[error("unexpected end of buffer at offset {offset}: {needed} more bytes required")]
    UnexpectedEof {
        /// Offset at which the missing bytes were expected
        offset: usize,
        /// How many bytes were still required
        needed: usize,
    },

    /// First byte of a value is not a known tag.
    #[error("unknown tag byte 0x{tag:02X} at offset {offset}")]
    UnknownTag {
        /// The unrecognized byte
        tag: u8,
        /// Offset of the tag byte
        offset: usize,
    },

    /// A length field exceeds [`MAX_PAYLOAD_LEN`], a varint runs past 64
    /// bits, or a declared length is inconsistent with the payload shape
    /// (e.g. a matrix byte length that is not a multiple of the cell size).
    #[error("invalid length {length} at offset {offset} (cap {max})")]
    LengthOverflow {
        /// The offending length value
        length: u64,
        /// Offset of the length field
        offset: usize,
        /// The bound that was violated
        max: u64,
    },

    /// A `String` or `Symbol` payload is not valid UTF-8.
    #[error("invalid UTF-8 in text payload at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the payload start
        offset: usize,
    },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
