//! Solvers for optimization problems, which minimize or maximize an objective.
//!
//! An [`OptimizationProblem`] maps solver variables `x: [f64; N]` to model
//! inputs, calls the model, and extracts a scalar objective. Solvers in this
//! module search for the `x` that minimizes or maximizes that objective.
//!
//! # Solvers
//!
//! - [`brent`]: golden-section search accelerated by parabolic interpolation
//!   over a bracket that is known to contain a minimum
//!
//! [`OptimizationProblem`]: strand_core::OptimizationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod brent;
