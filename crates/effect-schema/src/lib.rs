//! Effect-Schema Engine.
//!
//! Symbolic evaluation of declared function contracts at call sites. Given a
//! callee's contracts ("returns `true` only if `x` is non-null", "invokes
//! `block` exactly once") and the computations passed as arguments, the
//! engine derives an [`EffectSchema`] for the call: the facts a type checker
//! may use for smart casts and invocation-count analysis. Nothing is
//! executed.
//!
//! # Architecture
//!
//! - [`foundation`] - Identifiers, types with a subtype oracle, value descriptors
//! - [`expr`] - Condition expressions over [`Variable`]s and [`Constant`]s
//! - [`schema`] - [`Effect`], [`Clause`] and [`EffectSchema`]
//! - [`calltree`] - [`Computation`] nodes of nested calls
//! - [`functors`] - Effect combinators for `&&`, `||`, `!`, `is`, `==`
//! - [`visitors`] - [`Substitutor`] and [`Reducer`]
//! - [`contract`] - [`FunctionDescriptor`] with its declared contracts
//! - [`system`] - The [`EffectSystem`] entry point and its [`EffectSystemSettings`]
//! - [`facts`] - Reading call-site schemas for smart casts and call kinds
//! - [`error`] - Internal consistency faults
//!
//! # Soundness
//!
//! The engine may always answer "no information" (an empty schema). It must
//! never answer something wrong: every combinator drops a clause rather
//! than guess.
//!
//! # Example
//!
//! ```
//! use effect_schema::{
//!     Clause, Computation, Constant, Effect, EffectSchema, EffectSystem, Expr,
//!     FunctionDescriptor, Type, ValueDescriptor, Variable,
//! };
//!
//! // fun isString(x: Any?): Boolean, returns(true) implies (x is String)
//! let x = Variable::new(ValueDescriptor::new("isString.x", "x", Type::any().make_nullable()));
//! let is_string = FunctionDescriptor::builder("isString", Type::boolean())
//!     .parameter(x.clone())
//!     .contract(EffectSchema::new(vec![Clause::new(
//!         Expr::is(x, Type::class("String"), false),
//!         Effect::returns(Constant::True),
//!     )]))
//!     .build()?;
//!
//! let v = Variable::new(ValueDescriptor::new("main.v", "v", Type::any().make_nullable()));
//! let schema = EffectSystem::default().schema_for_call(&is_string, &[Computation::from(v)])?;
//!
//! assert_eq!(schema.to_string(), "Returns(TRUE) -> v is String");
//! # Ok::<(), effect_schema::Error>(())
//! ```

pub mod calltree;
pub mod contract;
pub mod error;
pub mod expr;
pub mod facts;
pub mod foundation;
pub mod functors;
pub mod schema;
pub mod settings;
pub mod system;
pub mod visitors;

pub use calltree::{BuiltInOperator, BuiltInOperatorCall, Computation, FunctionCall};
pub use contract::{FunctionDescriptor, FunctionDescriptorBuilder};
pub use error::{Error, Result};
pub use expr::{Constant, Equality, Expr, ExprVisitor, IsCheck, Value, Variable, lift};
pub use facts::{EqualityFact, Facts, TypeFact};
pub use foundation::{
    ClassId, DescriptorId, FunctionId, Path, Type, TypeHierarchy, TypeKind, ValueDescriptor,
};
pub use functors::{Functor, SubstitutingFunctor};
pub use schema::{Clause, Effect, EffectSchema, InvocationKind};
pub use settings::EffectSystemSettings;
pub use system::EffectSystem;
pub use visitors::{Reducer, Substitutor};
