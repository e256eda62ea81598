//! Hierarchical vector composition.
//!
//! A fixed pipeline lifts 5D rays into progressively higher-dimensional
//! identity vectors: per-domain centroids, salted 7D layers, the non-salted
//! base-universe branch, then literal concatenation up to the 42D terminal
//! vector. See [`universe::UniverseComposer`] for the stage machine.

mod derive;
mod seeds;
mod universe;

pub use derive::{
    concat, context_six, identity_seven, salted_seven, tetrahedral_spin, CONTEXT_DIM, LAYER_DIM,
    UNIVERSE_DIM,
};
pub use seeds::{
    DomainKind, SeedConfig, DISCREET_LAYER_SEED, SEMANTIC_REGISTER_SEED,
    SHARED_ACTION_MACRO_SEED, USER_TRANSACTION_SEED, VM_STATUS_SEED,
};
pub use universe::{DomainQuad, Stage, UniverseComposer, UniverseHarmony, UniverseInputs};
