//! Domain kinds and their master-seed constants.
//!
//! Each composition domain is stamped by harmonizing a fixed constant seed
//! string. The constants are protocol values: changing one changes every
//! derived vector in that branch.

use std::fmt;

use serde::{Deserialize, Serialize};
use ubhp_codec::CanonicalEncoder;

use crate::harmonic::harmonize;
use crate::ray::{project, Ray};

/// Master seed for the semantic-register (corpus) domain.
pub const SEMANTIC_REGISTER_SEED: &str = "UBHP_Domain_Register_Master_Key_For_Global_Context";
/// Master seed for the discreet-layer (protocol role) domain.
pub const DISCREET_LAYER_SEED: &str = "UBHP_Discreet_Layer_Master_Key_For_Socket_Server";
/// Master seed for the user-transaction domain.
pub const USER_TRANSACTION_SEED: &str = "UBHP_User_Transaction_Master_Key_For_Interaction_Space";
/// Master seed for the vm-status (type system) domain.
pub const VM_STATUS_SEED: &str = "UBHP_VM_Status_Master_Key_For_Live_State";
/// Master seed for the shared-action-macro domain.
pub const SHARED_ACTION_MACRO_SEED: &str = "UBHP_Shared_Action_Macro_Master_Key_For_Web_Interaction";

/// The five salted composition domains.
///
/// A domain is a named group of exactly four 5D rays whose centroid, stamped
/// with the domain's seed ray, yields one 7D layer of the identity stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    /// Corpus inputs (global semantic context).
    SemanticRegister,
    /// Protocol-role inputs (publish, subscribe, topic, message).
    DiscreetLayer,
    /// Transaction-role inputs (actor, action, state, timestamp).
    UserTransaction,
    /// Type-system inputs (class, function, type, interface).
    VmStatus,
    /// Shared action-macro inputs.
    SharedActionMacro,
}

impl DomainKind {
    /// All domains in composition order.
    pub fn all() -> [DomainKind; 5] {
        [
            Self::SemanticRegister,
            Self::DiscreetLayer,
            Self::UserTransaction,
            Self::VmStatus,
            Self::SharedActionMacro,
        ]
    }

    /// The canonical master-seed constant for this domain.
    #[inline]
    pub fn master_seed(&self) -> &'static str {
        match self {
            Self::SemanticRegister => SEMANTIC_REGISTER_SEED,
            Self::DiscreetLayer => DISCREET_LAYER_SEED,
            Self::UserTransaction => USER_TRANSACTION_SEED,
            Self::VmStatus => VM_STATUS_SEED,
            Self::SharedActionMacro => SHARED_ACTION_MACRO_SEED,
        }
    }

    /// Stable slot index, used for composer bookkeeping.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SemanticRegister => "semantic register",
            Self::DiscreetLayer => "discreet layer",
            Self::UserTransaction => "user transaction",
            Self::VmStatus => "vm status",
            Self::SharedActionMacro => "shared action macro",
        };
        f.write_str(name)
    }
}

/// Per-domain seed strings with the canonical constants as defaults.
///
/// Overriding a seed moves the whole derived family to a different but
/// equally reproducible branch, the same shared-context mechanism the
/// harmonic origin parameter provides at the byte level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub semantic_register: String,
    pub discreet_layer: String,
    pub user_transaction: String,
    pub vm_status: String,
    pub shared_action_macro: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            semantic_register: SEMANTIC_REGISTER_SEED.to_owned(),
            discreet_layer: DISCREET_LAYER_SEED.to_owned(),
            user_transaction: USER_TRANSACTION_SEED.to_owned(),
            vm_status: VM_STATUS_SEED.to_owned(),
            shared_action_macro: SHARED_ACTION_MACRO_SEED.to_owned(),
        }
    }
}

impl SeedConfig {
    /// The configured seed string for a domain.
    pub fn seed(&self, kind: DomainKind) -> &str {
        match kind {
            DomainKind::SemanticRegister => &self.semantic_register,
            DomainKind::DiscreetLayer => &self.discreet_layer,
            DomainKind::UserTransaction => &self.user_transaction,
            DomainKind::VmStatus => &self.vm_status,
            DomainKind::SharedActionMacro => &self.shared_action_macro,
        }
    }

    /// Derive the domain's 5D seed ray: the seed string is canonically
    /// encoded as a String tagged value, harmonized, and projected.
    pub fn seed_ray(&self, kind: DomainKind) -> Ray {
        let mut encoder = CanonicalEncoder::new();
        encoder.encode_string(self.seed(kind));
        let buffer = encoder.finalize();
        project(&harmonize(&buffer))
    }
}
