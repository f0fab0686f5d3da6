//! Errors raised by the effect-schema engine.
//!
//! Only internal consistency faults are errors. Ill-typed or otherwise
//! uninformative input is never an error: the engine degrades to producing
//! fewer clauses (ultimately [`EffectSchema::EMPTY`](crate::EffectSchema::EMPTY)).
//!
//! # Error Categories
//!
//! - **Arity faults**: [`Error::ArityMismatch`], [`Error::ParameterMismatch`]
//! - **Contract faults**: [`Error::DanglingVariable`]
//!
//! Every variant points at a bug in an upstream collaborator (the call-tree
//! builder or the contract-declaration front end). They are surfaced
//! immediately and never absorbed.

use thiserror::Error;

use crate::calltree::BuiltInOperator;
use crate::foundation::{DescriptorId, FunctionId};

/// Engine result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal consistency faults detected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A functor was applied to the wrong number of operands.
    #[error("wrong number of operands for {operator}: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Operator whose functor was applied
        operator: BuiltInOperator,
        /// Arity of the operator
        expected: usize,
        /// Number of operands supplied
        actual: usize,
    },

    /// A declared contract was substituted with an argument list whose length
    /// differs from the callee's parameter list (receivers included).
    #[error(
        "arguments and parameters size mismatch for {function}: arguments = {arguments}, parameters = {parameters}"
    )]
    ParameterMismatch {
        /// Callee whose contract was substituted
        function: FunctionId,
        /// Number of formal parameters, receivers included
        parameters: usize,
        /// Number of actual arguments
        arguments: usize,
    },

    /// A contract mentions a variable that is not a parameter of its function.
    ///
    /// Such a variable could never be bound at a call site and would leak
    /// into call-site schemas.
    #[error("contract of {function} refers to {variable}, which is not one of its parameters")]
    DanglingVariable {
        /// Function the contract was attached to
        function: FunctionId,
        /// Offending variable
        variable: DescriptorId,
    },
}
