//! Type-check operator: `arg is T` / `arg !is T`.

use super::split_finishing;
use crate::calltree::Computation;
use crate::expr::{Constant, Expr, IsCheck, Value};
use crate::foundation::Type;
use crate::schema::{Clause, Effect, EffectSchema};

/// Schema of `arg is ty` (`arg !is ty` when `negated`).
///
/// A plain value is checked directly. For a nested computation, the check is
/// applied to every value it may finish with, gated by the condition under
/// which it finishes with that value.
pub fn is(arg: &Computation, ty: &Type, negated: bool) -> EffectSchema {
    if let Some(value) = arg.as_value() {
        return EffectSchema::new(check_value(value, ty, negated, None));
    }

    let (finishing, mut clauses) = split_finishing(arg);
    for clause in finishing {
        if let Effect::Returns(value) = &clause.effect {
            clauses.extend(check_value(value, ty, negated, Some(&clause.condition)));
        }
    }
    EffectSchema::new(clauses)
}

fn check_value(value: &Value, ty: &Type, negated: bool, gate: Option<&Expr>) -> Vec<Clause> {
    let check = IsCheck {
        value: value.clone(),
        ty: ty.clone(),
        negated,
    };
    let inverted = check.invert();

    vec![
        Clause::new(
            Expr::from(check).and_opt(gate.cloned()),
            Effect::returns(Constant::True),
        ),
        Clause::new(
            Expr::from(inverted).and_opt(gate.cloned()),
            Effect::returns(Constant::False),
        ),
    ]
}
