//! Call-site specialization of a declared contract.
//!
//! # What This Functor Does
//!
//! 1. **Binding** - pairs the callee's formal parameters (dispatch receiver,
//!    extension receiver, value parameters) with the call's arguments
//! 2. **Effect rewriting** - `Calls` and `Returns` of a formal are rewritten
//!    to the actual value passed
//! 3. **Condition flattening** - each condition is substituted and evaluated
//!    through the operator functors, so nested argument calls contribute
//!    their own schemas
//! 4. **Recombination** - every way the substituted condition can evaluate to
//!    `TRUE` becomes a clause carrying the declared effect
//!
//! # What This Functor Does NOT Do
//!
//! - **No reduction** - constant folding is the [`Reducer`](crate::visitors::Reducer)'s job
//! - **No settings** - effect kinds are filtered by the [`EffectSystem`](crate::EffectSystem)

use indexmap::IndexMap;
use tracing::{debug, error, trace};

use crate::calltree::Computation;
use crate::contract::FunctionDescriptor;
use crate::error::{Error, Result};
use crate::expr::{Constant, Value, Variable};
use crate::schema::{Clause, Effect, EffectSchema};
use crate::visitors::Substitutor;

/// Functor applying one declared contract of `function` to call arguments.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutingFunctor<'a> {
    contract: &'a EffectSchema,
    function: &'a FunctionDescriptor,
}

impl<'a> SubstitutingFunctor<'a> {
    pub fn new(contract: &'a EffectSchema, function: &'a FunctionDescriptor) -> Self {
        Self { contract, function }
    }

    /// Specialize the contract to `arguments`, one per formal parameter.
    pub fn apply(&self, arguments: &[Computation]) -> Result<EffectSchema> {
        let parameters = self.function.arity();
        if parameters != arguments.len() {
            error!(
                function = %self.function.id,
                parameters,
                arguments = arguments.len(),
                "arguments and parameters size mismatch"
            );
            return Err(Error::ParameterMismatch {
                function: self.function.id.clone(),
                parameters,
                arguments: arguments.len(),
            });
        }
        trace!(function = %self.function.id, clauses = self.contract.len(), "substituting contract");

        let substitutions: IndexMap<Variable, Computation> = self
            .function
            .parameters()
            .cloned()
            .zip(arguments.iter().cloned())
            .collect();
        let mut substitutor = Substitutor::new(substitutions);

        let mut clauses = Vec::new();
        for clause in self.contract.clauses() {
            let Some(effect) = substitute_effect(&clause.effect, &substitutor) else {
                debug!(
                    function = %self.function.id,
                    effect = %clause.effect,
                    "effect does not bind to a call-site value, dropping clause"
                );
                continue;
            };

            if matches!(effect, Effect::Calls { .. })
                && clause.condition.as_constant() == Some(Constant::True)
            {
                clauses.push(Clause::always(effect));
                continue;
            }

            let condition = substitutor.substitute(&clause.condition)?;
            clauses.extend(
                condition
                    .effects()
                    .clauses()
                    .iter()
                    .filter_map(|substituted| combine(&effect, substituted)),
            );
        }

        Ok(EffectSchema::new(clauses))
    }
}

/// Rewrite a formal mentioned by the effect to the actual value passed.
///
/// `None` when the formal is bound to something other than a plain value.
fn substitute_effect(effect: &Effect, substitutor: &Substitutor) -> Option<Effect> {
    match effect {
        Effect::Calls { callable, kind } => {
            let actual = callable
                .as_variable()
                .and_then(|formal| substitutor.substitution(formal))
                .and_then(Computation::as_value)?;
            Some(Effect::calls(actual.clone(), *kind))
        }
        Effect::Returns(Value::Variable(formal)) => {
            let actual = substitutor.substitution(formal)?.as_value()?;
            Some(Effect::returns(actual.clone()))
        }
        Effect::Returns(Value::Constant(_)) => Some(effect.clone()),
    }
}

/// Attach the declared effect to one clause of the substituted condition.
fn combine(effect: &Effect, substituted: &Clause) -> Option<Clause> {
    match &substituted.effect {
        Effect::Returns(value) if !value.is_wildcard() => {
            (*value == Constant::True).then(|| substituted.replace_effect(effect.clone()))
        }
        Effect::Returns(_) | Effect::Calls { .. } => Some(substituted.clone()),
    }
}
