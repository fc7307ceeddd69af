//! Solvers for equation problems, which find roots of residual functions.
//!
//! An [`EquationProblem`] maps solver variables `x: [f64; N]` to model inputs,
//! calls the model, and computes residuals. Solvers in this module drive those
//! residuals toward zero.
//!
//! # Solvers
//!
//! - [`brent`]: bisection safeguarded by secant and inverse quadratic steps,
//!   on an interval whose endpoint residuals differ in sign
//!
//! [`EquationProblem`]: strand_core::EquationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod brent;
