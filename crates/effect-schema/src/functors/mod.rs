//! Functors: effect combinators for built-in operators.
//!
//! A functor computes the schema of an operator application from the
//! computations of its operands. Behaviour lives in free functions, one module
//! per operator family. [`Functor`] is the strategy table keyed by the
//! operator and is what condition expressions are evaluated through.
//!
//! # Sequential semantics
//!
//! Operands are first split into *finishing* clauses (a `Returns` of a
//! concrete value) and the *rest*. Only finishing clauses can be combined.
//! The rest (`Calls` effects, `Returns(WILDCARD)`) is passed through verbatim:
//! dropping it would lose invocation information about higher-order
//! arguments.
//!
//! # Soundness
//!
//! Every combinator prefers producing fewer clauses to producing a wrong
//! one. Ill-typed operands (a non-boolean constant under `&&`, a return value
//! that is neither `TRUE` nor `FALSE`) degrade to less information, never to
//! an error.
//!
//! # Arity
//!
//! Applying a functor to the wrong number of operands is an internal fault in
//! whoever built the call tree and is reported as [`Error::ArityMismatch`].

pub mod boolean;
pub mod equals;
pub mod is;
pub mod substituting;

pub use substituting::SubstitutingFunctor;

use tracing::{error, trace};

use crate::calltree::{BuiltInOperator, Computation};
use crate::error::{Error, Result};
use crate::expr::{Constant, Expr};
use crate::foundation::Type;
use crate::schema::{Clause, Effect, EffectSchema};

/// Functor of a built-in operator, with the operator's static parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Functor {
    And,
    Or,
    Not,
    Is { ty: Type, negated: bool },
    Equals { negated: bool },
}

impl Functor {
    /// Functor evaluating the operator at the root of `expr`; `None` for leaves.
    pub fn of(expr: &Expr) -> Option<Functor> {
        match expr {
            Expr::Variable(_) | Expr::Constant(_) => None,
            Expr::And { .. } => Some(Functor::And),
            Expr::Or { .. } => Some(Functor::Or),
            Expr::Not(_) => Some(Functor::Not),
            Expr::Is(is) => Some(Functor::Is {
                ty: is.ty.clone(),
                negated: is.negated,
            }),
            Expr::Equal(equal) => Some(Functor::Equals {
                negated: equal.negated,
            }),
        }
    }

    pub fn operator(&self) -> BuiltInOperator {
        match self {
            Functor::And => BuiltInOperator::And,
            Functor::Or => BuiltInOperator::Or,
            Functor::Not => BuiltInOperator::Not,
            Functor::Is { .. } => BuiltInOperator::Is,
            Functor::Equals { .. } => BuiltInOperator::Equals,
        }
    }

    /// Combine the operands' schemas into the schema of the application.
    pub fn apply(&self, operands: &[Computation]) -> Result<EffectSchema> {
        let operator = self.operator();
        trace!(%operator, operands = operands.len(), "applying functor");

        let schema = match (self, operands) {
            (Functor::And, [left, right]) => boolean::and(left, right),
            (Functor::Or, [left, right]) => boolean::or(left, right),
            (Functor::Not, [arg]) => boolean::not(arg),
            (Functor::Is { ty, negated }, [arg]) => is::is(arg, ty, *negated),
            (Functor::Equals { negated }, [left, right]) => equals::equals(left, right, *negated),
            _ => {
                let expected = operator.arity();
                error!(
                    %operator,
                    expected,
                    actual = operands.len(),
                    "functor applied to wrong number of operands"
                );
                return Err(Error::ArityMismatch {
                    operator,
                    expected,
                    actual: operands.len(),
                });
            }
        };
        Ok(schema)
    }

    /// Apply and wrap the result as a call-tree node.
    pub fn call(&self, operands: &[Computation]) -> Result<Computation> {
        Ok(Computation::operator(self.operator(), self.apply(operands)?))
    }
}

/// Split an operand's clauses into finishing clauses and the rest.
pub(crate) fn split_finishing(operand: &Computation) -> (Vec<Clause>, Vec<Clause>) {
    operand.effects().partition(Effect::is_finishing)
}

/// Fold conditions with OR: "if any of these held". `None` for no conditions.
pub(crate) fn fold_conditions_with_or<'a>(
    conditions: impl IntoIterator<Item = &'a Expr>,
) -> Option<Expr> {
    conditions
        .into_iter()
        .cloned()
        .reduce(|acc, condition| Expr::or(acc, condition))
}

/// Combine two optional conditions, falling back to whichever side is known.
pub(crate) fn apply_with_default(
    left: Option<Expr>,
    right: Option<Expr>,
    combine: impl FnOnce(Expr, Expr) -> Expr,
) -> Option<Expr> {
    match (left, right) {
        (Some(left), Some(right)) => Some(combine(left, right)),
        (Some(known), None) | (None, Some(known)) => Some(known),
        (None, None) => None,
    }
}

/// Combine two optional conditions only when both are known.
pub(crate) fn apply_if_both(
    left: Option<Expr>,
    right: Option<Expr>,
    combine: impl FnOnce(Expr, Expr) -> Expr,
) -> Option<Expr> {
    Some(combine(left?, right?))
}

/// Conditions under which a group of finishing clauses returns `TRUE` and
/// `FALSE`, each folded with OR.
///
/// Clauses returning anything else are ignored: they only appear when the
/// surrounding expression was not well-typed as boolean.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct BooleanOutcomes {
    pub when_true: Option<Expr>,
    pub when_false: Option<Expr>,
}

impl BooleanOutcomes {
    pub fn of(clauses: &[Clause]) -> Self {
        Self {
            when_true: fold_conditions_with_or(conditions_returning(clauses, Constant::True)),
            when_false: fold_conditions_with_or(conditions_returning(clauses, Constant::False)),
        }
    }
}

fn conditions_returning(clauses: &[Clause], expected: Constant) -> impl Iterator<Item = &Expr> {
    clauses
        .iter()
        .filter(move |clause| matches!(&clause.effect, Effect::Returns(v) if *v == expected))
        .map(|clause| &clause.condition)
}
