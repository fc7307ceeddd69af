//! Bracketed single-variable solvers for the Strand framework.
//!
//! Both solvers take a [`Model`] and a problem that adapts a scalar solver
//! variable to the model input, and report progress to an [`Observer`].
//!
//! - [`optimization::brent`]: minimum of a unimodal objective on a bracket
//! - [`equation::brent`]: root of a residual whose sign changes on a bracket
//!
//! [`Model`]: strand_core::Model
//! [`Observer`]: strand_core::Observer

pub mod equation;
pub mod optimization;
