//! Hierarchical vector composer.
//!
//! Orchestrates the fixed pipeline that builds progressively
//! higher-dimensional identity vectors: per-domain centroids and salted 7D
//! layers, the non-salted base-universe branch, then literal concatenation
//! up to the 42D terminal vector.
//!
//! Every derived vector is a state-machine slot: `unavailable` until all
//! declared prerequisites are `computed`, immutable afterwards, and only
//! ever superseded by [`UniverseComposer::reset`] plus recomputation from
//! scratch. Deriving a vector whose inputs are missing is
//! [`HarmonyError::MissingPrerequisite`], naming the gap.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::centroid::ray_centroid;
use crate::error::{HarmonyError, HarmonyResult};
use crate::ray::Ray;

use super::derive::{concat, context_six, identity_seven, salted_seven, LAYER_DIM, UNIVERSE_DIM};
use super::seeds::{DomainKind, SeedConfig};

/// A domain's input group: exactly four 5D rays.
pub type DomainQuad = [Ray; 4];

/// The full input roster of one composition run.
///
/// The base-universe branch consumes the four foundational-principle rays
/// plus the document and entity rays; each salted domain consumes its own
/// quad. All rays are 5D projections produced by [`crate::ray::project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseInputs {
    /// Foundational-principle rays (freedom, autonomy, reciprocity,
    /// sovereignty in the canonical roster).
    pub principles: DomainQuad,
    /// Document ray for the base-universe context.
    pub document: Ray,
    /// Entity ray extending the context to the 7D identity.
    pub entity: Ray,
    /// Corpus quad for the semantic-register domain.
    pub semantic_register: DomainQuad,
    /// Protocol-role quad (publish, subscribe, topic, message).
    pub discreet_layer: DomainQuad,
    /// Transaction-role quad (actor, action, state, timestamp).
    pub user_transaction: DomainQuad,
    /// Type-system quad (class, function, type, interface).
    pub vm_status: DomainQuad,
    /// Macro quad (definition, event listener, peer sharing, ui transform).
    pub shared_action_macro: DomainQuad,
}

impl UniverseInputs {
    /// The input quad feeding a salted domain.
    pub fn domain(&self, kind: DomainKind) -> &DomainQuad {
        match kind {
            DomainKind::SemanticRegister => &self.semantic_register,
            DomainKind::DiscreetLayer => &self.discreet_layer,
            DomainKind::UserTransaction => &self.user_transaction,
            DomainKind::VmStatus => &self.vm_status,
            DomainKind::SharedActionMacro => &self.shared_action_macro,
        }
    }
}

/// Names every derived vector in the pipeline, for state observation and
/// prerequisite errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Centroid of the foundational-principle quad.
    FoundationCentroid,
    /// Non-salted 6D base-universe context.
    ContextSix,
    /// Non-salted 7D base-universe identity.
    IdentitySeven,
    /// Centroid of a salted domain's quad.
    DomainCentroid(DomainKind),
    /// Salted 7D layer of a domain.
    DomainSeven(DomainKind),
    /// baseUniverse7 ‖ semanticRegister7
    Harmony14,
    /// 14D ‖ discreetLayer7
    Harmony21,
    /// 21D ‖ userTransaction7
    Harmony28,
    /// 28D ‖ vmStatus7
    Harmony35,
    /// 35D ‖ sharedActionMacro7
    Harmony42,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FoundationCentroid => write!(f, "foundation centroid (5D)"),
            Self::ContextSix => write!(f, "base-universe context (6D)"),
            Self::IdentitySeven => write!(f, "base-universe identity (7D)"),
            Self::DomainCentroid(kind) => write!(f, "{kind} centroid (5D)"),
            Self::DomainSeven(kind) => write!(f, "{kind} layer (7D)"),
            Self::Harmony14 => write!(f, "addressable harmony (14D)"),
            Self::Harmony21 => write!(f, "model harmony (21D)"),
            Self::Harmony28 => write!(f, "model harmony (28D)"),
            Self::Harmony35 => write!(f, "model harmony (35D)"),
            Self::Harmony42 => write!(f, "universal harmony (42D)"),
        }
    }
}

/// Immutable snapshot of a completed composition run.
///
/// The component accessors slice the 42D terminal vector at its fixed
/// layer boundaries; each slice is bit-identical to the stored stage vector
/// it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseHarmony {
    pub foundation_centroid: Ray,
    pub context_six: Vec<f64>,
    pub identity_seven: Vec<f64>,
    pub semantic_register_seven: Vec<f64>,
    pub discreet_layer_seven: Vec<f64>,
    pub user_transaction_seven: Vec<f64>,
    pub vm_status_seven: Vec<f64>,
    pub shared_action_macro_seven: Vec<f64>,
    pub harmony_14: Vec<f64>,
    pub harmony_21: Vec<f64>,
    pub harmony_28: Vec<f64>,
    pub harmony_35: Vec<f64>,
    pub harmony_42: Vec<f64>,
}

impl UniverseHarmony {
    /// Layer 1: base-universe identity, `harmony_42[0..7]`.
    pub fn base_universe(&self) -> &[f64] {
        &self.harmony_42[0..LAYER_DIM]
    }

    /// Layer 2: semantic register, `harmony_42[7..14]`.
    pub fn semantic_register(&self) -> &[f64] {
        &self.harmony_42[LAYER_DIM..2 * LAYER_DIM]
    }

    /// Layer 3: discreet layer, `harmony_42[14..21]`.
    pub fn discreet_layer(&self) -> &[f64] {
        &self.harmony_42[2 * LAYER_DIM..3 * LAYER_DIM]
    }

    /// Layer 4: user transaction, `harmony_42[21..28]`.
    pub fn user_transaction(&self) -> &[f64] {
        &self.harmony_42[3 * LAYER_DIM..4 * LAYER_DIM]
    }

    /// Layer 5: vm status, `harmony_42[28..35]`.
    pub fn vm_status(&self) -> &[f64] {
        &self.harmony_42[4 * LAYER_DIM..5 * LAYER_DIM]
    }

    /// Layer 6: shared action macros, `harmony_42[35..42]`.
    pub fn shared_action_macro(&self) -> &[f64] {
        &self.harmony_42[5 * LAYER_DIM..UNIVERSE_DIM]
    }
}

/// Staged derivation over one input roster.
///
/// Stages may be driven one call at a time (each returning a copy of the
/// derived vector) or all at once via [`compose_all`]. A stage that is
/// already computed returns its stored value unchanged; the only way back
/// to `unavailable` is [`reset`].
///
/// [`compose_all`]: UniverseComposer::compose_all
/// [`reset`]: UniverseComposer::reset
#[derive(Debug, Clone)]
pub struct UniverseComposer {
    inputs: UniverseInputs,
    seeds: SeedConfig,
    foundation_centroid: Option<Ray>,
    context_six: Option<Vec<f64>>,
    identity_seven: Option<Vec<f64>>,
    domain_centroids: [Option<Ray>; 5],
    domain_sevens: [Option<Vec<f64>>; 5],
    harmony_14: Option<Vec<f64>>,
    harmony_21: Option<Vec<f64>>,
    harmony_28: Option<Vec<f64>>,
    harmony_35: Option<Vec<f64>>,
    harmony_42: Option<Vec<f64>>,
}

impl UniverseComposer {
    /// Composer over the canonical seed constants.
    pub fn new(inputs: UniverseInputs) -> Self {
        Self::with_seeds(inputs, SeedConfig::default())
    }

    /// Composer over caller-supplied seeds.
    pub fn with_seeds(inputs: UniverseInputs, seeds: SeedConfig) -> Self {
        Self {
            inputs,
            seeds,
            foundation_centroid: None,
            context_six: None,
            identity_seven: None,
            domain_centroids: [None; 5],
            domain_sevens: Default::default(),
            harmony_14: None,
            harmony_21: None,
            harmony_28: None,
            harmony_35: None,
            harmony_42: None,
        }
    }

    /// Whether a stage has transitioned from `unavailable` to `computed`.
    pub fn is_computed(&self, stage: Stage) -> bool {
        match stage {
            Stage::FoundationCentroid => self.foundation_centroid.is_some(),
            Stage::ContextSix => self.context_six.is_some(),
            Stage::IdentitySeven => self.identity_seven.is_some(),
            Stage::DomainCentroid(kind) => self.domain_centroids[kind.index()].is_some(),
            Stage::DomainSeven(kind) => self.domain_sevens[kind.index()].is_some(),
            Stage::Harmony14 => self.harmony_14.is_some(),
            Stage::Harmony21 => self.harmony_21.is_some(),
            Stage::Harmony28 => self.harmony_28.is_some(),
            Stage::Harmony35 => self.harmony_35.is_some(),
            Stage::Harmony42 => self.harmony_42.is_some(),
        }
    }

    /// Drop every derived vector back to `unavailable`. The inputs and seed
    /// configuration are kept; the next derivations recompute from scratch.
    pub fn reset(&mut self) {
        debug!("resetting composer pipeline");
        self.foundation_centroid = None;
        self.context_six = None;
        self.identity_seven = None;
        self.domain_centroids = [None; 5];
        self.domain_sevens = Default::default();
        self.harmony_14 = None;
        self.harmony_21 = None;
        self.harmony_28 = None;
        self.harmony_35 = None;
        self.harmony_42 = None;
    }

    /// Centroid of the foundational-principle quad.
    pub fn derive_foundation_centroid(&mut self) -> HarmonyResult<Ray> {
        if let Some(ray) = self.foundation_centroid {
            return Ok(ray);
        }
        let ray = ray_centroid(&self.inputs.principles)?;
        debug!(stage = %Stage::FoundationCentroid, "derived");
        self.foundation_centroid = Some(ray);
        Ok(ray)
    }

    /// Non-salted 6D context. Requires the foundation centroid.
    pub fn derive_context_six(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.context_six {
            return Ok(v.clone());
        }
        let centroid = self
            .foundation_centroid
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::FoundationCentroid,
            })?;
        let context = context_six(&centroid, &self.inputs.document);
        debug!(stage = %Stage::ContextSix, "derived");
        self.context_six = Some(context.clone());
        Ok(context)
    }

    /// Non-salted 7D identity. Requires the 6D context.
    pub fn derive_identity_seven(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.identity_seven {
            return Ok(v.clone());
        }
        let context = self
            .context_six
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::ContextSix,
            })?;
        let identity = identity_seven(context, &self.inputs.entity)?;
        debug!(stage = %Stage::IdentitySeven, "derived");
        self.identity_seven = Some(identity.clone());
        Ok(identity)
    }

    /// Centroid of a salted domain's quad.
    pub fn derive_domain_centroid(&mut self, kind: DomainKind) -> HarmonyResult<Ray> {
        if let Some(ray) = self.domain_centroids[kind.index()] {
            return Ok(ray);
        }
        let ray = ray_centroid(self.inputs.domain(kind))?;
        debug!(stage = %Stage::DomainCentroid(kind), "derived");
        self.domain_centroids[kind.index()] = Some(ray);
        Ok(ray)
    }

    /// Salted 7D layer of a domain. Requires the domain's centroid.
    pub fn derive_domain_seven(&mut self, kind: DomainKind) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.domain_sevens[kind.index()] {
            return Ok(v.clone());
        }
        let centroid =
            self.domain_centroids[kind.index()].ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::DomainCentroid(kind),
            })?;
        let seed_ray = self.seeds.seed_ray(kind);
        let layer = salted_seven(&centroid, &seed_ray);
        debug!(stage = %Stage::DomainSeven(kind), "derived");
        self.domain_sevens[kind.index()] = Some(layer.clone());
        Ok(layer)
    }

    /// 14D: base-universe identity ‖ semantic-register layer.
    pub fn derive_harmony_14(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.harmony_14 {
            return Ok(v.clone());
        }
        let identity = self
            .identity_seven
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::IdentitySeven,
            })?;
        let register = self.domain_seven_slot(DomainKind::SemanticRegister)?;
        let joined = concat(&[identity, register]);
        debug!(stage = %Stage::Harmony14, "derived");
        self.harmony_14 = Some(joined.clone());
        Ok(joined)
    }

    /// 21D: 14D ‖ discreet layer.
    pub fn derive_harmony_21(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.harmony_21 {
            return Ok(v.clone());
        }
        let base = self
            .harmony_14
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::Harmony14,
            })?;
        let layer = self.domain_seven_slot(DomainKind::DiscreetLayer)?;
        let joined = concat(&[base, layer]);
        debug!(stage = %Stage::Harmony21, "derived");
        self.harmony_21 = Some(joined.clone());
        Ok(joined)
    }

    /// 28D: 21D ‖ user-transaction layer.
    pub fn derive_harmony_28(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.harmony_28 {
            return Ok(v.clone());
        }
        let base = self
            .harmony_21
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::Harmony21,
            })?;
        let layer = self.domain_seven_slot(DomainKind::UserTransaction)?;
        let joined = concat(&[base, layer]);
        debug!(stage = %Stage::Harmony28, "derived");
        self.harmony_28 = Some(joined.clone());
        Ok(joined)
    }

    /// 35D: 28D ‖ vm-status layer.
    pub fn derive_harmony_35(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.harmony_35 {
            return Ok(v.clone());
        }
        let base = self
            .harmony_28
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::Harmony28,
            })?;
        let layer = self.domain_seven_slot(DomainKind::VmStatus)?;
        let joined = concat(&[base, layer]);
        debug!(stage = %Stage::Harmony35, "derived");
        self.harmony_35 = Some(joined.clone());
        Ok(joined)
    }

    /// 42D: 35D ‖ shared-action-macro layer.
    pub fn derive_harmony_42(&mut self) -> HarmonyResult<Vec<f64>> {
        if let Some(v) = &self.harmony_42 {
            return Ok(v.clone());
        }
        let base = self
            .harmony_35
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::Harmony35,
            })?;
        let layer = self.domain_seven_slot(DomainKind::SharedActionMacro)?;
        let joined = concat(&[base, layer]);
        debug!(stage = %Stage::Harmony42, "derived");
        self.harmony_42 = Some(joined.clone());
        Ok(joined)
    }

    /// Run every stage in dependency order and return the immutable
    /// snapshot. Acts as the barrier of a parallel fan-out: callers
    /// harmonize and project inputs however they like, then this call
    /// sequences the derivations.
    pub fn compose_all(&mut self) -> HarmonyResult<UniverseHarmony> {
        self.derive_foundation_centroid()?;
        self.derive_context_six()?;
        self.derive_identity_seven()?;
        for kind in DomainKind::all() {
            self.derive_domain_centroid(kind)?;
            self.derive_domain_seven(kind)?;
        }
        self.derive_harmony_14()?;
        self.derive_harmony_21()?;
        self.derive_harmony_28()?;
        self.derive_harmony_35()?;
        self.derive_harmony_42()?;

        Ok(UniverseHarmony {
            foundation_centroid: self.foundation_centroid.unwrap_or_default(),
            context_six: self.context_six.clone().unwrap_or_default(),
            identity_seven: self.identity_seven.clone().unwrap_or_default(),
            semantic_register_seven: self.cloned_domain(DomainKind::SemanticRegister),
            discreet_layer_seven: self.cloned_domain(DomainKind::DiscreetLayer),
            user_transaction_seven: self.cloned_domain(DomainKind::UserTransaction),
            vm_status_seven: self.cloned_domain(DomainKind::VmStatus),
            shared_action_macro_seven: self.cloned_domain(DomainKind::SharedActionMacro),
            harmony_14: self.harmony_14.clone().unwrap_or_default(),
            harmony_21: self.harmony_21.clone().unwrap_or_default(),
            harmony_28: self.harmony_28.clone().unwrap_or_default(),
            harmony_35: self.harmony_35.clone().unwrap_or_default(),
            harmony_42: self.harmony_42.clone().unwrap_or_default(),
        })
    }

    fn domain_seven_slot(&self, kind: DomainKind) -> HarmonyResult<&[f64]> {
        self.domain_sevens[kind.index()]
            .as_deref()
            .ok_or(HarmonyError::MissingPrerequisite {
                stage: Stage::DomainSeven(kind),
            })
    }

    fn cloned_domain(&self, kind: DomainKind) -> Vec<f64> {
        self.domain_sevens[kind.index()].clone().unwrap_or_default()
    }
}
