//! Call-tree nodes.
//!
//! A [`Computation`] is one node of the tree of nested calls the host builds
//! for an expression: it pairs a result type with the [`EffectSchema`] known
//! for that node. Plain values are computations too, with no effects of their
//! own; functors treat them specially because they can be named directly in
//! conditions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expr::{Constant, Value, Variable};
use crate::foundation::{FunctionId, Type};
use crate::schema::EffectSchema;

static NO_EFFECTS: EffectSchema = EffectSchema::EMPTY;

/// Built-in operators whose effects are derived by a functor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltInOperator {
    Equals,
    And,
    Or,
    Not,
    Is,
}

impl BuiltInOperator {
    /// Number of operands the operator takes.
    pub fn arity(self) -> usize {
        match self {
            BuiltInOperator::Not | BuiltInOperator::Is => 1,
            BuiltInOperator::Equals | BuiltInOperator::And | BuiltInOperator::Or => 2,
        }
    }
}

impl fmt::Display for BuiltInOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BuiltInOperator::Equals => "==",
            BuiltInOperator::And => "&&",
            BuiltInOperator::Or => "||",
            BuiltInOperator::Not => "!",
            BuiltInOperator::Is => "is",
        };
        f.write_str(symbol)
    }
}

/// Call of a resolved function; the schema comes from its substituted contracts.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: FunctionId,
    pub return_type: Type,
    pub effects: EffectSchema,
}

/// Application of a built-in operator; the schema comes from its functor.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltInOperatorCall {
    pub operator: BuiltInOperator,
    pub effects: EffectSchema,
}

/// A node of the call tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Computation {
    /// A variable or constant used directly.
    Value(Value),
    FunctionCall(FunctionCall),
    BuiltInOperatorCall(BuiltInOperatorCall),
    /// Anything the analysis cannot characterize.
    Unknown,
}

impl Computation {
    /// Static result type of the computation.
    pub fn ty(&self) -> Type {
        match self {
            Computation::Value(value) => value.ty(),
            Computation::FunctionCall(call) => call.return_type.clone(),
            Computation::BuiltInOperatorCall(_) => Type::boolean(),
            Computation::Unknown => Type::any(),
        }
    }

    /// Effects known for the computation.
    pub fn effects(&self) -> &EffectSchema {
        match self {
            Computation::Value(_) | Computation::Unknown => &NO_EFFECTS,
            Computation::FunctionCall(call) => &call.effects,
            Computation::BuiltInOperatorCall(call) => &call.effects,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Computation::Value(value) => Some(value),
            Computation::FunctionCall(_)
            | Computation::BuiltInOperatorCall(_)
            | Computation::Unknown => None,
        }
    }

    pub fn as_constant(&self) -> Option<Constant> {
        self.as_value().and_then(Value::as_constant)
    }

    pub fn operator(operator: BuiltInOperator, effects: EffectSchema) -> Self {
        Computation::BuiltInOperatorCall(BuiltInOperatorCall { operator, effects })
    }
}

impl From<Value> for Computation {
    fn from(value: Value) -> Self {
        Computation::Value(value)
    }
}

impl From<Variable> for Computation {
    fn from(variable: Variable) -> Self {
        Computation::Value(Value::Variable(variable))
    }
}

impl From<Constant> for Computation {
    fn from(constant: Constant) -> Self {
        Computation::Value(Value::Constant(constant))
    }
}
