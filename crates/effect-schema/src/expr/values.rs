//! Symbolic values: variables bound to resolved symbols and the fixed set of
//! built-in constants.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::{Type, ValueDescriptor};

/// A variable standing for a resolved parameter or receiver.
///
/// Two variables are equal iff they denote the same descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    descriptor: Arc<ValueDescriptor>,
}

impl Variable {
    pub fn new(descriptor: ValueDescriptor) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
        }
    }

    pub fn descriptor(&self) -> &ValueDescriptor {
        &self.descriptor
    }

    /// Declared static type of the underlying symbol.
    pub fn ty(&self) -> &Type {
        &self.descriptor.ty
    }
}

impl From<ValueDescriptor> for Variable {
    fn from(descriptor: ValueDescriptor) -> Self {
        Self::new(descriptor)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor.name)
    }
}

/// Built-in constants of the effect algebra.
///
/// `Wildcard` stands for "some concrete value the analysis does not model"
/// and is used instead of guessing when nothing more precise is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    True,
    False,
    Null,
    NotNull,
    Wildcard,
}

impl Constant {
    /// Every constant, in declaration order.
    pub const ALL: [Constant; 5] = [
        Constant::True,
        Constant::False,
        Constant::Null,
        Constant::NotNull,
        Constant::Wildcard,
    ];

    /// Static type of the constant.
    pub fn ty(self) -> Type {
        match self {
            Constant::True | Constant::False => Type::boolean(),
            Constant::Null => Type::nothing().make_nullable(),
            Constant::NotNull => Type::any(),
            Constant::Wildcard => Type::any().make_nullable(),
        }
    }

    /// `Null` and `NotNull` form a domain isomorphic to boolean.
    pub fn is_null_constant(self) -> bool {
        matches!(self, Constant::Null | Constant::NotNull)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Constant::True | Constant::False)
    }

    /// Whether the constant denotes a single runtime value.
    ///
    /// `NotNull` and `Wildcard` stand for a whole range of values, so their
    /// static type is only an upper bound of what they hold.
    pub fn is_exact(self) -> bool {
        match self {
            Constant::True | Constant::False | Constant::Null => true,
            Constant::NotNull | Constant::Wildcard => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::True => "TRUE",
            Constant::False => "FALSE",
            Constant::Null => "NULL",
            Constant::NotNull => "NOT_NULL",
            Constant::Wildcard => "WILDCARD",
        }
    }
}

/// Lift a Rust boolean into the algebra.
pub fn lift(value: bool) -> Constant {
    if value { Constant::True } else { Constant::False }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plain value: the leaves of expressions and the payload of effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Variable(Variable),
    Constant(Constant),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Variable(variable) => variable.ty().clone(),
            Value::Constant(constant) => constant.ty(),
        }
    }

    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Value::Constant(constant) => Some(*constant),
            Value::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Value::Variable(variable) => Some(variable),
            Value::Constant(_) => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        *self == Value::Constant(Constant::Wildcard)
    }
}

impl From<Variable> for Value {
    fn from(variable: Variable) -> Self {
        Value::Variable(variable)
    }
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        Value::Constant(constant)
    }
}

impl PartialEq<Constant> for Value {
    fn eq(&self, other: &Constant) -> bool {
        self.as_constant() == Some(*other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Variable(variable) => write!(f, "{}", variable),
            Value::Constant(constant) => write!(f, "{}", constant),
        }
    }
}
