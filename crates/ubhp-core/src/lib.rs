//! Universal Binary Harmony Protocol core.
//!
//! Deterministic content fingerprinting and hierarchical vector composition
//! over the canonical wire format provided by `ubhp-codec`.
//!
//! # Pipeline
//!
//! Data flows one direction, each stage a plain function call:
//!
//! ```text
//! raw bytes / text
//!   -> CanonicalEncoder        (ubhp-codec)
//!   -> harmonize               -> HarmonicVector
//!   -> project                 -> Ray (5D)
//!   -> centroid / compose      -> 6D, 7D, 14D, 21D, 28D, 35D, 42D
//! ```
//!
//! No component reads back from a later stage, and the core keeps no memory
//! between calls apart from the per-session encoder buffer. There is no
//! hidden observer machinery: recomputation is an explicit
//! [`compose::UniverseComposer::reset`] followed by fresh derivations.
//!
//! # Determinism
//!
//! Every fingerprint and every derived vector is a pure function of its
//! input bytes (plus, optionally, a shared origin buffer or seed string).
//! Identical inputs yield bit-identical outputs; nothing in this crate reads
//! the clock or a random source.
//!
//! # Concurrency
//!
//! All functions here are referentially transparent and synchronous; callers
//! may fan out over many inputs freely, with
//! [`compose::UniverseComposer::compose_all`] as the barrier that sequences
//! the derivation stages.

pub mod centroid;
pub mod compose;
pub mod error;
pub mod harmonic;
pub mod input;
pub mod ray;
pub mod similarity;

pub use centroid::{centroid, ray_centroid};
pub use compose::{
    salted_seven, tetrahedral_spin, DomainKind, SeedConfig, Stage, UniverseComposer,
    UniverseHarmony, UniverseInputs,
};
pub use error::{HarmonyError, HarmonyResult};
pub use harmonic::{harmonize, harmonize_with_origin, HarmonicVector, PHI};
pub use input::{buffer_ray, lambda_ray, read_source};
pub use ray::{project, Ray, RAY_DIM};
pub use similarity::{cosine_similarity, unit_ray};
