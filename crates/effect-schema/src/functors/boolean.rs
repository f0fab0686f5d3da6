//! Boolean connectives: `&&`, `||` and `!`.
//!
//! For `&&` and `||` each operand's finishing clauses are summarised into the
//! condition under which it returns `TRUE` and the one under which it returns
//! `FALSE` (see [`BooleanOutcomes`]). The two summaries are then combined
//! asymmetrically:
//!
//! | Result | `&&` | `\|\|` |
//! |--------|------|--------|
//! | `TRUE`  | both were true: AND, a missing side is skipped | one was true: OR, both sides required |
//! | `FALSE` | one was false: OR, both sides required | both were false: AND, a missing side is skipped |
//!
//! Skipping a missing side is sound only where the result pins down *both*
//! operands; where it pins down only one of them, an unknown side could be
//! the one that decided the result, so no clause is produced.

use tracing::debug;

use super::{BooleanOutcomes, apply_if_both, apply_with_default, split_finishing};
use crate::calltree::Computation;
use crate::expr::{Constant, Expr};
use crate::schema::{Clause, Effect, EffectSchema};

/// Schema of `left && right`.
pub fn and(left: &Computation, right: &Computation) -> EffectSchema {
    if let Some(constant) = left.as_constant() {
        return and_with_constant(right, constant);
    }
    if let Some(constant) = right.as_constant() {
        return and_with_constant(left, constant);
    }

    combine(left, right, |l, r| {
        let when_true = apply_with_default(l.when_true, r.when_true, |a, b| Expr::and(a, b));
        let when_false = apply_if_both(l.when_false, r.when_false, |a, b| Expr::or(a, b));
        (when_true, when_false)
    })
}

/// Schema of `left || right`.
pub fn or(left: &Computation, right: &Computation) -> EffectSchema {
    if let Some(constant) = left.as_constant() {
        return or_with_constant(right, constant);
    }
    if let Some(constant) = right.as_constant() {
        return or_with_constant(left, constant);
    }

    combine(left, right, |l, r| {
        let when_true = apply_if_both(l.when_true, r.when_true, |a, b| Expr::or(a, b));
        let when_false = apply_with_default(l.when_false, r.when_false, |a, b| Expr::and(a, b));
        (when_true, when_false)
    })
}

/// Schema of `!arg`.
///
/// Finishing clauses swap `TRUE` and `FALSE`; a finishing clause returning
/// anything else has no meaning under `!` and is dropped.
pub fn not(arg: &Computation) -> EffectSchema {
    let (finishing, mut clauses) = split_finishing(arg);

    for clause in finishing {
        let negated = match &clause.effect {
            Effect::Returns(value) if *value == Constant::True => Constant::False,
            Effect::Returns(value) if *value == Constant::False => Constant::True,
            effect => {
                debug!(%effect, "dropping non-boolean clause under negation");
                continue;
            }
        };
        clauses.push(clause.replace_effect(Effect::returns(negated)));
    }

    EffectSchema::new(clauses)
}

fn and_with_constant(computation: &Computation, constant: Constant) -> EffectSchema {
    match constant {
        Constant::True => computation.effects().clone(),
        Constant::False => EffectSchema::EMPTY,
        other => {
            debug!(constant = %other, "non-boolean constant under &&");
            computation.effects().clone()
        }
    }
}

fn or_with_constant(computation: &Computation, constant: Constant) -> EffectSchema {
    match constant {
        Constant::False => computation.effects().clone(),
        Constant::True => EffectSchema::EMPTY,
        other => {
            debug!(constant = %other, "non-boolean constant under ||");
            computation.effects().clone()
        }
    }
}

/// Shared skeleton of `&&` and `||`: rest clauses of both operands first,
/// then the synthesized `TRUE` and `FALSE` clauses.
fn combine(
    left: &Computation,
    right: &Computation,
    outcomes: impl FnOnce(BooleanOutcomes, BooleanOutcomes) -> (Option<Expr>, Option<Expr>),
) -> EffectSchema {
    let (left_finishing, left_rest) = split_finishing(left);
    let (right_finishing, right_rest) = split_finishing(right);

    let (when_true, when_false) = outcomes(
        BooleanOutcomes::of(&left_finishing),
        BooleanOutcomes::of(&right_finishing),
    );

    let mut clauses = left_rest;
    clauses.extend(right_rest);
    if let Some(condition) = when_true {
        clauses.push(Clause::new(condition, Effect::returns(Constant::True)));
    }
    if let Some(condition) = when_false {
        clauses.push(Clause::new(condition, Effect::returns(Constant::False)));
    }
    EffectSchema::new(clauses)
}
