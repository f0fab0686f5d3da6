//! Entry point for hosts: schemas of calls and operator applications.
//!
//! The [`EffectSystem`] owns the settings and the type hierarchy and runs the
//! per-call pipeline:
//!
//! ```text
//! contracts → substitute (per contract) → concatenate → filter by settings → reduce
//! ```
//!
//! Nothing is cached; every call site is evaluated from scratch.

use tracing::{debug, trace};

use crate::calltree::{Computation, FunctionCall};
use crate::contract::FunctionDescriptor;
use crate::error::Result;
use crate::foundation::TypeHierarchy;
use crate::functors::{Functor, SubstitutingFunctor};
use crate::schema::EffectSchema;
use crate::settings::EffectSystemSettings;
use crate::visitors::Reducer;

/// Settings-gated effect evaluation for call sites.
#[derive(Debug, Clone, Default)]
pub struct EffectSystem {
    settings: EffectSystemSettings,
    hierarchy: TypeHierarchy,
}

impl EffectSystem {
    pub fn new(settings: EffectSystemSettings, hierarchy: TypeHierarchy) -> Self {
        Self {
            settings,
            hierarchy,
        }
    }

    pub fn settings(&self) -> &EffectSystemSettings {
        &self.settings
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    /// Schema of `function` called with `arguments`.
    ///
    /// `arguments` lists receivers first, in the order of
    /// [`FunctionDescriptor::parameters`].
    pub fn schema_for_call(
        &self,
        function: &FunctionDescriptor,
        arguments: &[Computation],
    ) -> Result<EffectSchema> {
        if !function.has_contracts() {
            trace!(function = %function.id, "no contracts declared");
            return Ok(EffectSchema::EMPTY);
        }

        let mut clauses = Vec::new();
        for contract in function.contracts() {
            let substituted = SubstitutingFunctor::new(contract, function).apply(arguments)?;
            clauses.extend(substituted);
        }

        let schema = self.finish(EffectSchema::new(clauses));
        debug!(function = %function.id, clauses = schema.len(), "call-site schema");
        Ok(schema)
    }

    /// Call-tree node for `function` called with `arguments`.
    pub fn call(
        &self,
        function: &FunctionDescriptor,
        arguments: &[Computation],
    ) -> Result<Computation> {
        let effects = self.schema_for_call(function, arguments)?;
        Ok(Computation::FunctionCall(FunctionCall {
            function: function.id.clone(),
            return_type: function.return_type.clone(),
            effects,
        }))
    }

    /// Call-tree node for a built-in operator applied to `operands`.
    pub fn operator(&self, functor: &Functor, operands: &[Computation]) -> Result<Computation> {
        let effects = self.finish(functor.apply(operands)?);
        Ok(Computation::operator(functor.operator(), effects))
    }

    /// Constant-fold a schema with this system's type hierarchy.
    pub fn reduce(&self, schema: &EffectSchema) -> EffectSchema {
        Reducer::new(&self.hierarchy).reduce_schema(schema)
    }

    fn finish(&self, schema: EffectSchema) -> EffectSchema {
        let filtered: EffectSchema = schema
            .into_iter()
            .filter(|clause| self.settings.allows(&clause.effect))
            .collect();

        if self.settings.reduce_schemas {
            self.reduce(&filtered)
        } else {
            filtered
        }
    }
}
