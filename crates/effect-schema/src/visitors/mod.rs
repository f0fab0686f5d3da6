//! Traversals over condition expressions.
//!
//! - [`Substitutor`] binds formal parameters to call-site computations
//! - [`Reducer`] folds constants and drops infeasible clauses

pub mod reducer;
pub mod substitutor;

pub use reducer::Reducer;
pub use substitutor::Substitutor;
