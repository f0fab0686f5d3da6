//! Constant folding of clause conditions.
//!
//! Evaluates whatever part of a condition is decidable from constants and
//! declared types, and drops clauses whose condition folds to `FALSE`: their
//! effect can never be observed.
//!
//! | Node | Folds to |
//! |------|----------|
//! | `c is T`, `c` exact constant | `TRUE`/`FALSE` by the subtype oracle |
//! | `v is T`, `v` variable, `NOT_NULL` or `WILDCARD` | `TRUE` when its type is below `T`, else unchanged |
//! | `c == d`, both exact constants | `TRUE`/`FALSE` by constant identity |
//! | `NULL == NOT_NULL` | `FALSE` |
//! | `&&`, `\|\|` | absorbing constant, or the other operand for the identity constant |
//! | `!c` | the opposite literal |
//!
//! Anything undecidable is rebuilt from its reduced operands. Reduction is
//! idempotent.

use tracing::trace;

use crate::expr::{Constant, Equality, Expr, ExprVisitor, IsCheck, Value, Variable, lift};
use crate::foundation::TypeHierarchy;
use crate::schema::{Clause, EffectSchema};

/// Constant-folding visitor; `None` means "drop the clause".
#[derive(Debug, Clone, Copy)]
pub struct Reducer<'a> {
    hierarchy: &'a TypeHierarchy,
}

impl<'a> Reducer<'a> {
    pub fn new(hierarchy: &'a TypeHierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn reduce(&mut self, expr: &Expr) -> Option<Expr> {
        expr.accept(self)
    }

    /// Reduce every condition, dropping clauses that can never fire.
    pub fn reduce_schema(&mut self, schema: &EffectSchema) -> EffectSchema {
        schema
            .clauses()
            .iter()
            .filter_map(|clause| self.reduce_clause(clause))
            .collect()
    }

    fn reduce_clause(&mut self, clause: &Clause) -> Option<Clause> {
        match self.reduce(&clause.condition) {
            Some(Expr::Constant(Constant::False)) | None => {
                trace!(clause = %clause, "dropping infeasible clause");
                None
            }
            Some(condition) => Some(Clause::new(condition, clause.effect.clone())),
        }
    }

    fn decide_is(&self, is: &IsCheck) -> Option<bool> {
        match &is.value {
            Value::Constant(constant) if constant.is_exact() => {
                Some(self.hierarchy.is_subtype(&constant.ty(), &is.ty))
            }
            // the static type only bounds the value from above
            Value::Constant(constant) => {
                self.hierarchy.is_subtype(&constant.ty(), &is.ty).then_some(true)
            }
            Value::Variable(variable) => {
                self.hierarchy.is_subtype(variable.ty(), &is.ty).then_some(true)
            }
        }
    }

    fn decide_equal(equal: &Equality) -> Option<bool> {
        let (Value::Constant(left), Value::Constant(right)) = (&equal.left, &equal.right) else {
            return None;
        };
        match (*left, *right) {
            (Constant::Null, Constant::NotNull) | (Constant::NotNull, Constant::Null) => {
                Some(false)
            }
            (left, right) if left.is_exact() && right.is_exact() => Some(left == right),
            _ => None,
        }
    }
}

impl ExprVisitor for Reducer<'_> {
    type Output = Option<Expr>;

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output {
        Some(Expr::Variable(variable.clone()))
    }

    fn visit_constant(&mut self, constant: Constant) -> Self::Output {
        Some(Expr::Constant(constant))
    }

    fn visit_and(&mut self, left: &Expr, right: &Expr) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;

        let reduced = match (left.as_constant(), right.as_constant()) {
            (Some(Constant::False), _) | (_, Some(Constant::False)) => Expr::from(Constant::False),
            (Some(Constant::True), _) => right,
            (_, Some(Constant::True)) => left,
            _ => Expr::and(left, right),
        };
        Some(reduced)
    }

    fn visit_or(&mut self, left: &Expr, right: &Expr) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;

        let reduced = match (left.as_constant(), right.as_constant()) {
            (Some(Constant::True), _) | (_, Some(Constant::True)) => Expr::from(Constant::True),
            (Some(Constant::False), _) => right,
            (_, Some(Constant::False)) => left,
            _ => Expr::or(left, right),
        };
        Some(reduced)
    }

    fn visit_not(&mut self, arg: &Expr) -> Self::Output {
        let arg = arg.accept(self)?;
        let reduced = match arg.as_constant() {
            Some(Constant::True) => Expr::from(Constant::False),
            Some(Constant::False) => Expr::from(Constant::True),
            _ => Expr::not(arg),
        };
        Some(reduced)
    }

    fn visit_is(&mut self, is: &IsCheck) -> Self::Output {
        let reduced = match self.decide_is(is) {
            Some(holds) => Expr::from(lift(holds ^ is.negated)),
            None => Expr::Is(is.clone()),
        };
        Some(reduced)
    }

    fn visit_equal(&mut self, equal: &Equality) -> Self::Output {
        let reduced = match Self::decide_equal(equal) {
            Some(holds) => Expr::from(lift(holds ^ equal.negated)),
            None => Expr::Equal(equal.clone()),
        };
        Some(reduced)
    }
}
