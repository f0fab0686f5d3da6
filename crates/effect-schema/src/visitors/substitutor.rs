//! Variable substitution over condition expressions.
//!
//! Replaces formal parameters by the computations passed at a call site and
//! flattens the resulting tree bottom-up: every operator node re-applies its
//! functor to the substituted operands, so the returned computation carries
//! the effects of the whole condition with the arguments' own effects taken
//! into account.

use indexmap::IndexMap;

use crate::calltree::Computation;
use crate::error::Result;
use crate::expr::{Constant, Equality, Expr, ExprVisitor, IsCheck, Value, Variable};
use crate::functors::Functor;

/// Substitutes variables by call-site computations.
///
/// Variables without a substitution stay themselves.
#[derive(Debug, Clone, Default)]
pub struct Substitutor {
    substitutions: IndexMap<Variable, Computation>,
}

impl Substitutor {
    pub fn new(substitutions: IndexMap<Variable, Computation>) -> Self {
        Self { substitutions }
    }

    /// Substitute and flatten `expr` into a single computation.
    pub fn substitute(&mut self, expr: &Expr) -> Result<Computation> {
        expr.accept(self)
    }

    /// Actual computation for a variable, if one was supplied.
    pub fn substitution(&self, variable: &Variable) -> Option<&Computation> {
        self.substitutions.get(variable)
    }

    fn substitute_value(&self, value: &Value) -> Computation {
        match value {
            Value::Variable(variable) => self.lookup(variable),
            Value::Constant(constant) => Computation::from(*constant),
        }
    }

    fn lookup(&self, variable: &Variable) -> Computation {
        self.substitutions
            .get(variable)
            .cloned()
            .unwrap_or_else(|| Computation::from(variable.clone()))
    }
}

impl ExprVisitor for Substitutor {
    type Output = Result<Computation>;

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output {
        Ok(self.lookup(variable))
    }

    fn visit_constant(&mut self, constant: Constant) -> Self::Output {
        Ok(Computation::from(constant))
    }

    fn visit_and(&mut self, left: &Expr, right: &Expr) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Functor::And.call(&[left, right])
    }

    fn visit_or(&mut self, left: &Expr, right: &Expr) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Functor::Or.call(&[left, right])
    }

    fn visit_not(&mut self, arg: &Expr) -> Self::Output {
        let arg = arg.accept(self)?;
        Functor::Not.call(&[arg])
    }

    fn visit_is(&mut self, is: &IsCheck) -> Self::Output {
        let arg = self.substitute_value(&is.value);
        Functor::Is {
            ty: is.ty.clone(),
            negated: is.negated,
        }
        .call(&[arg])
    }

    fn visit_equal(&mut self, equal: &Equality) -> Self::Output {
        let left = self.substitute_value(&equal.left);
        let right = self.substitute_value(&equal.right);
        Functor::Equals {
            negated: equal.negated,
        }
        .call(&[left, right])
    }
}
