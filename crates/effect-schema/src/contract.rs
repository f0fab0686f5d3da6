//! Function descriptors and their declared contracts.
//!
//! A [`FunctionDescriptor`] is the resolved callee as the resolution front end
//! hands it over: receivers, value parameters, return type, and zero or more
//! declared [`EffectSchema`]s written over the formal parameters.
//!
//! Contracts are validated when the descriptor is built: a contract may only
//! mention variables that are parameters of its own function, otherwise the
//! variable could never be bound at a call site and would leak into the
//! call-site schema.

use std::fmt;

use tracing::error;

use crate::error::{Error, Result};
use crate::expr::{Value, Variable};
use crate::foundation::{FunctionId, Type};
use crate::schema::{Effect, EffectSchema};

/// A resolved callable symbol with its declared contracts.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    /// Unique identifier
    pub id: FunctionId,
    /// Source-level name
    pub name: String,
    /// Receiver of a member function
    pub dispatch_receiver: Option<Variable>,
    /// Receiver of an extension function
    pub extension_receiver: Option<Variable>,
    /// Value parameters in declaration order
    pub value_parameters: Vec<Variable>,
    /// Declared return type
    pub return_type: Type,
    contracts: Vec<EffectSchema>,
}

impl FunctionDescriptor {
    /// Start describing a function.
    pub fn builder(id: impl Into<FunctionId>, return_type: Type) -> FunctionDescriptorBuilder {
        FunctionDescriptorBuilder::new(id.into(), return_type)
    }

    /// Formal parameters in substitution order: dispatch receiver, extension
    /// receiver, then value parameters.
    pub fn parameters(&self) -> impl Iterator<Item = &Variable> {
        self.dispatch_receiver
            .iter()
            .chain(self.extension_receiver.iter())
            .chain(self.value_parameters.iter())
    }

    /// Number of formal parameters, receivers included.
    pub fn arity(&self) -> usize {
        self.parameters().count()
    }

    /// Value parameter with the given source name.
    pub fn parameter_named(&self, name: &str) -> Option<Variable> {
        self.value_parameters
            .iter()
            .find(|parameter| parameter.descriptor().name == name)
            .cloned()
    }

    /// Declared contracts, each over the formal parameters.
    pub fn contracts(&self) -> &[EffectSchema] {
        &self.contracts
    }

    pub fn has_contracts(&self) -> bool {
        self.contracts.iter().any(|contract| !contract.is_empty())
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(receiver) = &self.extension_receiver {
            write!(f, "{}.", receiver.ty())?;
        }
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.value_parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter.descriptor())?;
        }
        write!(f, "): {}", self.return_type)
    }
}

/// Builder for [`FunctionDescriptor`].
#[derive(Debug, Clone)]
pub struct FunctionDescriptorBuilder {
    id: FunctionId,
    return_type: Type,
    dispatch_receiver: Option<Variable>,
    extension_receiver: Option<Variable>,
    value_parameters: Vec<Variable>,
    contracts: Vec<EffectSchema>,
}

impl FunctionDescriptorBuilder {
    fn new(id: FunctionId, return_type: Type) -> Self {
        Self {
            id,
            return_type,
            dispatch_receiver: None,
            extension_receiver: None,
            value_parameters: Vec::new(),
            contracts: Vec::new(),
        }
    }

    /// Set the receiver of a member function.
    pub fn dispatch_receiver(mut self, receiver: impl Into<Variable>) -> Self {
        self.dispatch_receiver = Some(receiver.into());
        self
    }

    /// Set the receiver of an extension function.
    pub fn extension_receiver(mut self, receiver: impl Into<Variable>) -> Self {
        self.extension_receiver = Some(receiver.into());
        self
    }

    /// Append a value parameter.
    pub fn parameter(mut self, parameter: impl Into<Variable>) -> Self {
        self.value_parameters.push(parameter.into());
        self
    }

    /// Attach a declared contract. Checked in [`build`](Self::build).
    pub fn contract(mut self, contract: EffectSchema) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Build the descriptor, rejecting contracts that mention variables
    /// which are not parameters of this function.
    pub fn build(self) -> Result<FunctionDescriptor> {
        let name = self.id.simple_name().to_string();
        let descriptor = FunctionDescriptor {
            id: self.id,
            name,
            dispatch_receiver: self.dispatch_receiver,
            extension_receiver: self.extension_receiver,
            value_parameters: self.value_parameters,
            return_type: self.return_type,
            contracts: self.contracts,
        };

        for contract in &descriptor.contracts {
            for clause in contract.clauses() {
                let mut mentioned = clause.condition.variables();
                mentioned.extend(effect_variable(&clause.effect));

                if let Some(dangling) = mentioned
                    .into_iter()
                    .find(|variable| !descriptor.parameters().any(|p| p == *variable))
                {
                    error!(
                        function = %descriptor.id,
                        variable = %dangling.descriptor().id,
                        "contract refers to a variable outside the parameter list"
                    );
                    return Err(Error::DanglingVariable {
                        function: descriptor.id.clone(),
                        variable: dangling.descriptor().id.clone(),
                    });
                }
            }
        }

        Ok(descriptor)
    }
}

fn effect_variable(effect: &Effect) -> Option<&Variable> {
    match effect {
        Effect::Returns(value) | Effect::Calls { callable: value, .. } => match value {
            Value::Variable(variable) => Some(variable),
            Value::Constant(_) => None,
        },
    }
}
