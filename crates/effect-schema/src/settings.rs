//! Engine settings.

use serde::{Deserialize, Serialize};

use crate::schema::Effect;

/// Feature gates for contract evaluation.
///
/// Missing keys take their default when deserialized, so hosts only need to
/// spell out what they turn off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectSystemSettings {
    /// Keep `Returns` clauses in call-site schemas.
    pub returns_effects: bool,

    /// Keep `Calls` clauses in call-site schemas.
    pub calls_in_place_effects: bool,

    /// Constant-fold call-site schemas and drop infeasible clauses.
    pub reduce_schemas: bool,
}

impl EffectSystemSettings {
    /// Whether clauses with this effect survive into call-site schemas.
    pub fn allows(&self, effect: &Effect) -> bool {
        match effect {
            Effect::Returns(_) => self.returns_effects,
            Effect::Calls { .. } => self.calls_in_place_effects,
        }
    }
}

impl Default for EffectSystemSettings {
    fn default() -> Self {
        Self {
            returns_effects: true,
            calls_in_place_effects: true,
            reduce_schemas: true,
        }
    }
}
