//! External input helpers.
//!
//! The pipeline accepts three input shapes: raw byte sequences (file
//! contents), UTF-8 text treated as the source body of a Lambda tagged
//! value, and the named seed constants handled by
//! [`crate::compose::SeedConfig`]. These helpers cover the first two,
//! producing projected 5D rays ready for the composer.

use std::path::Path;

use tracing::debug;
use ubhp_codec::CanonicalEncoder;

use crate::error::HarmonyResult;
use crate::harmonic::harmonize;
use crate::ray::{project, Ray};

/// Read an external resource into memory.
///
/// # Errors
/// [`crate::HarmonyError::SourceRead`] carrying the underlying I/O error
/// unchanged. No retry logic lives here; retries belong to the caller.
pub fn read_source(path: impl AsRef<Path>) -> HarmonyResult<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), len = bytes.len(), "read source");
    Ok(bytes)
}

/// Project UTF-8 text as a lambda input: the text becomes the opaque body
/// of a Lambda tagged value, and the canonical buffer is fingerprinted.
pub fn lambda_ray(source: &str) -> Ray {
    let mut encoder = CanonicalEncoder::new();
    encoder.encode_lambda(source.as_bytes());
    let buffer = encoder.finalize();
    project(&harmonize(&buffer))
}

/// Project a raw byte sequence (e.g. file contents) without re-encoding.
pub fn buffer_ray(bytes: &[u8]) -> Ray {
    project(&harmonize(bytes))
}
