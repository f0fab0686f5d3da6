//! Expression algebra of the effect system.
//!
//! Clause conditions are immutable trees over symbolic [`Value`]s. The set of
//! node kinds is closed: every traversal in the crate is an exhaustive `match`,
//! so adding an operator is a compile-time obligation at each of them.
//!
//! # Node kinds
//!
//! | Node | Meaning |
//! |------|---------|
//! | [`Expr::Variable`] | a parameter or receiver of the analysed call |
//! | [`Expr::Constant`] | `TRUE`, `FALSE`, `NULL`, `NOT_NULL`, `WILDCARD` |
//! | [`Expr::And`] / [`Expr::Or`] | boolean connectives |
//! | [`Expr::Not`] | boolean negation |
//! | [`Expr::Is`] | type check of a value, optionally negated |
//! | [`Expr::Equal`] | identity of two values, optionally negated |
//!
//! Sub-trees are reference counted, so conditions can be shared between
//! clauses without copying.
//!
//! # Examples
//!
//! ```
//! # use effect_schema::expr::{Constant, Expr, Variable};
//! # use effect_schema::foundation::{Type, ValueDescriptor};
//! let x = Variable::new(ValueDescriptor::new("f.x", "x", Type::any().make_nullable()));
//! let not_null = Expr::is(x.clone(), Type::any(), false);
//! let condition = Expr::and(not_null, Expr::equal(x, Constant::NotNull, false));
//!
//! assert_eq!(condition.to_string(), "(x is Any && x == NOT_NULL)");
//! ```

pub mod values;

pub use values::{Constant, Value, Variable, lift};

use std::fmt;
use std::sync::Arc;

use crate::foundation::Type;

/// A condition expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Variable(Variable),
    Constant(Constant),
    And { left: Arc<Expr>, right: Arc<Expr> },
    Or { left: Arc<Expr>, right: Arc<Expr> },
    Not(Arc<Expr>),
    Is(IsCheck),
    Equal(Equality),
}

/// `value is ty` (or `value !is ty` when negated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsCheck {
    pub value: Value,
    pub ty: Type,
    pub negated: bool,
}

/// `left == right` (or `left != right` when negated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equality {
    pub left: Value,
    pub right: Value,
    pub negated: bool,
}

impl IsCheck {
    /// The same check with the opposite polarity.
    pub fn invert(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }
}

impl Equality {
    /// The same comparison with the opposite polarity.
    pub fn invert(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }
}

impl Expr {
    pub fn and(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::And {
            left: Arc::new(left.into()),
            right: Arc::new(right.into()),
        }
    }

    pub fn or(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Or {
            left: Arc::new(left.into()),
            right: Arc::new(right.into()),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(arg: impl Into<Expr>) -> Self {
        Expr::Not(Arc::new(arg.into()))
    }

    pub fn is(value: impl Into<Value>, ty: Type, negated: bool) -> Self {
        Expr::Is(IsCheck {
            value: value.into(),
            ty,
            negated,
        })
    }

    pub fn equal(left: impl Into<Value>, right: impl Into<Value>, negated: bool) -> Self {
        Expr::Equal(Equality {
            left: left.into(),
            right: right.into(),
            negated,
        })
    }

    /// Conjoin with an optional second condition; absent means "no extra
    /// constraint".
    pub fn and_opt(self, other: Option<Expr>) -> Self {
        match other {
            Some(other) => Expr::and(self, other),
            None => self,
        }
    }

    /// The value this expression is, if it is a leaf.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            Expr::Variable(variable) => Some(Value::Variable(variable.clone())),
            Expr::Constant(constant) => Some(Value::Constant(*constant)),
            Expr::And { .. } | Expr::Or { .. } | Expr::Not(_) | Expr::Is(_) | Expr::Equal(_) => {
                None
            }
        }
    }

    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Expr::Constant(constant) => Some(*constant),
            Expr::Variable(_)
            | Expr::And { .. }
            | Expr::Or { .. }
            | Expr::Not(_)
            | Expr::Is(_)
            | Expr::Equal(_) => None,
        }
    }

    /// Every variable occurring in the expression, in left-to-right order
    /// (with repetitions).
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        match self {
            Expr::Variable(variable) => out.push(variable),
            Expr::Constant(_) => {}
            Expr::And { left, right } | Expr::Or { left, right } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
            Expr::Not(arg) => arg.collect_variables(out),
            Expr::Is(is) => out.extend(is.value.as_variable()),
            Expr::Equal(equal) => {
                out.extend(equal.left.as_variable());
                out.extend(equal.right.as_variable());
            }
        }
    }

    /// Dispatch to the visitor method for this node kind.
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Variable(variable) => visitor.visit_variable(variable),
            Expr::Constant(constant) => visitor.visit_constant(*constant),
            Expr::And { left, right } => visitor.visit_and(left, right),
            Expr::Or { left, right } => visitor.visit_or(left, right),
            Expr::Not(arg) => visitor.visit_not(arg),
            Expr::Is(is) => visitor.visit_is(is),
            Expr::Equal(equal) => visitor.visit_equal(equal),
        }
    }
}

/// One method per node kind; see [`Expr::accept`].
pub trait ExprVisitor {
    type Output;

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output;
    fn visit_constant(&mut self, constant: Constant) -> Self::Output;
    fn visit_and(&mut self, left: &Expr, right: &Expr) -> Self::Output;
    fn visit_or(&mut self, left: &Expr, right: &Expr) -> Self::Output;
    fn visit_not(&mut self, arg: &Expr) -> Self::Output;
    fn visit_is(&mut self, is: &IsCheck) -> Self::Output;
    fn visit_equal(&mut self, equal: &Equality) -> Self::Output;
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        match value {
            Value::Variable(variable) => Expr::Variable(variable),
            Value::Constant(constant) => Expr::Constant(constant),
        }
    }
}

impl From<Variable> for Expr {
    fn from(variable: Variable) -> Self {
        Expr::Variable(variable)
    }
}

impl From<Constant> for Expr {
    fn from(constant: Constant) -> Self {
        Expr::Constant(constant)
    }
}

impl From<IsCheck> for Expr {
    fn from(is: IsCheck) -> Self {
        Expr::Is(is)
    }
}

impl From<Equality> for Expr {
    fn from(equal: Equality) -> Self {
        Expr::Equal(equal)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Variable(variable) => write!(f, "{}", variable),
            Expr::Constant(constant) => write!(f, "{}", constant),
            Expr::And { left, right } => write!(f, "({} && {})", left, right),
            Expr::Or { left, right } => write!(f, "({} || {})", left, right),
            Expr::Not(arg) => write!(f, "!{}", arg),
            Expr::Is(is) => {
                let op = if is.negated { "!is" } else { "is" };
                write!(f, "{} {} {}", is.value, op, is.ty)
            }
            Expr::Equal(equal) => {
                let op = if equal.negated { "!=" } else { "==" };
                write!(f, "{} {} {}", equal.left, op, equal.right)
            }
        }
    }
}
