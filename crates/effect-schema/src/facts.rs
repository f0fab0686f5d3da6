//! Reading call-site schemas for downstream consumers.
//!
//! Smart casts need to know what holds after a call was *observed* to return
//! a particular value; call-kind analysis needs to know how lambdas passed to
//! the call are invoked. Both are read off a call-site [`EffectSchema`] here.
//!
//! # Reading clauses
//!
//! A clause `(C, Returns(v))` promises that `C` held whenever `v` was
//! returned. When several clauses promise something for the same `v`, any one
//! of them may be the one that applied, so only atoms common to all of them
//! are facts.

use indexmap::IndexMap;
use tracing::trace;

use crate::expr::{Constant, Equality, Expr, IsCheck, Value, Variable};
use crate::foundation::Type;
use crate::schema::{Effect, EffectSchema, InvocationKind};

/// `variable is ty` (or `!is` when negated) is known to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFact {
    pub variable: Variable,
    pub ty: Type,
    pub negated: bool,
}

/// `left == right` (or `!=` when negated) is known to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFact {
    pub left: Value,
    pub right: Value,
    pub negated: bool,
}

/// Everything known after observing one returned value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    pub types: Vec<TypeFact>,
    pub equalities: Vec<EqualityFact>,
}

impl Facts {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.equalities.is_empty()
    }

    /// Types `variable` is known to have.
    pub fn types_of<'a>(&'a self, variable: &'a Variable) -> impl Iterator<Item = &'a Type> {
        self.types
            .iter()
            .filter(move |fact| !fact.negated && fact.variable == *variable)
            .map(|fact| &fact.ty)
    }

    /// Whether `variable` is known to be non-null.
    pub fn is_not_null(&self, variable: &Variable) -> bool {
        let by_type = self.types_of(variable).any(|ty| !ty.nullable);
        let by_equality = self.equalities.iter().any(|fact| {
            let other = match (&fact.left, &fact.right) {
                (Value::Variable(v), other) | (other, Value::Variable(v)) if v == variable => other,
                _ => return false,
            };
            matches!(
                (other, fact.negated),
                (Value::Constant(Constant::Null), true) | (Value::Constant(Constant::NotNull), false)
            )
        });
        by_type || by_equality
    }
}

/// Facts guaranteed once the call was observed to return `observed`.
pub fn collect(schema: &EffectSchema, observed: Constant) -> Facts {
    let observed = Value::Constant(observed);
    let mut matching = schema.returning(&observed).map(|clause| {
        let mut atoms = Vec::new();
        conjuncts(&clause.condition, &mut atoms);
        atoms
    });

    let Some(mut common) = matching.next() else {
        trace!(%observed, "no clause for observed value");
        return Facts::default();
    };
    for atoms in matching {
        common.retain(|atom| atoms.contains(atom));
    }

    let mut facts = Facts::default();
    for atom in common {
        match atom {
            Atom::Is(IsCheck {
                value: Value::Variable(variable),
                ty,
                negated,
            }) => push_unique(&mut facts.types, TypeFact { variable, ty, negated }),
            Atom::Is(_) => {}
            Atom::Equal(Equality {
                left,
                right,
                negated,
            }) => push_unique(&mut facts.equalities, EqualityFact { left, right, negated }),
        }
    }
    facts
}

/// How each lambda argument is invoked, from unconditional `Calls` clauses.
///
/// Several clauses for the same callable with different kinds combine to
/// [`InvocationKind::Unknown`].
pub fn invocations(schema: &EffectSchema) -> IndexMap<Variable, InvocationKind> {
    let mut kinds: IndexMap<Variable, InvocationKind> = IndexMap::new();

    for clause in schema.clauses() {
        let Effect::Calls {
            callable: Value::Variable(callable),
            kind,
        } = &clause.effect
        else {
            continue;
        };
        if clause.condition.as_constant() != Some(Constant::True) {
            continue;
        }

        kinds
            .entry(callable.clone())
            .and_modify(|known| {
                if *known != *kind {
                    *known = InvocationKind::Unknown;
                }
            })
            .or_insert(*kind);
    }
    kinds
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Atom {
    Is(IsCheck),
    Equal(Equality),
}

/// Atoms of the top-level conjunction of `expr`.
fn conjuncts(expr: &Expr, out: &mut Vec<Atom>) {
    match expr {
        Expr::And { left, right } => {
            conjuncts(left, out);
            conjuncts(right, out);
        }
        Expr::Is(is) => out.push(Atom::Is(is.clone())),
        Expr::Equal(equal) => out.push(Atom::Equal(equal.clone())),
        Expr::Not(arg) => match arg.as_ref() {
            Expr::Is(is) => out.push(Atom::Is(is.invert())),
            Expr::Equal(equal) => out.push(Atom::Equal(equal.invert())),
            Expr::Variable(_)
            | Expr::Constant(_)
            | Expr::And { .. }
            | Expr::Or { .. }
            | Expr::Not(_) => {}
        },
        Expr::Variable(_) | Expr::Constant(_) | Expr::Or { .. } => {}
    }
}

fn push_unique<T: PartialEq>(out: &mut Vec<T>, item: T) {
    if !out.contains(&item) {
        out.push(item);
    }
}
