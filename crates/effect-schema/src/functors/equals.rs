//! Equality operator: `left == right` / `left != right`.
//!
//! Producing a `Returns(TRUE)` clause for a general equality would require
//! knowing *every* way both sides can end up equal. Consider `foo(x) ==
//! bar(x)` where `foo` returns true only if `x is String` and `bar` returns
//! true only if `x is Int`: the comparison is also true when both return
//! false, which neither schema describes. Only the shapes below are handled;
//! everything else yields no information.
//!
//! | Operands | Clauses |
//! |----------|---------|
//! | value, value | both `TRUE` and `FALSE`, via an [`Expr::Equal`] condition |
//! | call, constant | `TRUE` where the call returns the constant; `FALSE` only for boolean-like domains |
//! | anything else | none |
//!
//! For a call operand, clauses that do not finish with a concrete value
//! (`Calls`, `Returns(WILDCARD)`) are passed through first, as for every
//! other operator.

use tracing::debug;

use super::split_finishing;
use crate::calltree::Computation;
use crate::expr::{Constant, Expr, Value, lift};
use crate::schema::{Clause, Effect, EffectSchema};

/// Schema of `left == right` (`left != right` when `negated`).
pub fn equals(left: &Computation, right: &Computation, negated: bool) -> EffectSchema {
    if let (Some(left), Some(right)) = (left.as_value(), right.as_value()) {
        return equate_values(left, right, negated);
    }

    if let Some(constant) = left.as_constant() {
        return equate_call_and_constant(right, constant, negated);
    }
    if let Some(constant) = right.as_constant() {
        return equate_call_and_constant(left, constant, negated);
    }

    debug!("equality of two non-constant computations carries no information");
    EffectSchema::EMPTY
}

fn equate_values(left: &Value, right: &Value, negated: bool) -> EffectSchema {
    EffectSchema::new(vec![
        Clause::new(
            Expr::equal(left.clone(), right.clone(), negated),
            Effect::returns(Constant::True),
        ),
        Clause::new(
            Expr::equal(left.clone(), right.clone(), !negated),
            Effect::returns(Constant::False),
        ),
    ])
}

fn equate_call_and_constant(call: &Computation, constant: Constant, negated: bool) -> EffectSchema {
    let (finishing, mut clauses) = split_finishing(call);

    for clause in finishing {
        let Effect::Returns(returned) = &clause.effect else {
            continue;
        };

        if *returned == constant {
            clauses.push(clause.replace_effect(Effect::returns(lift(!negated))));
            continue;
        }

        match returned.as_constant() {
            Some(other) if is_safe_to_produce_false(call, other, constant) => {
                clauses.push(clause.replace_effect(Effect::returns(lift(negated))));
            }
            _ => debug!(
                returned = %returned,
                %constant,
                "mismatch does not prove inequality, dropping clause"
            ),
        }
    }

    EffectSchema::new(clauses)
}

/// A mismatch proves inequality only in domains isomorphic to boolean, where
/// the other value is the only remaining possibility.
fn is_safe_to_produce_false(call: &Computation, returned: Constant, constant: Constant) -> bool {
    let booleans = constant.ty().is_boolean() && call.ty().is_boolean();
    let nullness = returned.is_null_constant() && constant.is_null_constant();
    booleans || nullness
}
